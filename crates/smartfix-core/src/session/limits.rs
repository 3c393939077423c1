//! Session termination limits.

use serde::{Deserialize, Serialize};

/// Tunable bounds on session length.
///
/// These are local safeguards, not protocol constants: the oracle is never
/// told about them and they can be adjusted per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    /// Maximum number of distinct questions shown to the user.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Consecutive verbatim-repeated questions tolerated before giving up.
    #[serde(default = "default_max_repeat")]
    pub max_repeat: u32,
}

fn default_max_depth() -> usize {
    8
}

fn default_max_repeat() -> u32 {
    3
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_repeat: default_max_repeat(),
        }
    }
}
