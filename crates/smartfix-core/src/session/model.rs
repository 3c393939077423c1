//! Session state value object.
//!
//! `SessionState` is owned exclusively by the `SessionController` for the
//! session's lifetime, lives only in memory, and is discarded at session end.
//! There is no persistence layer by design.

use crate::case::Case;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The progression phase of a triage session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A question is (or is about to be) displayed; answers are accepted.
    AwaitingAnswer,
    /// A terminal outcome has been produced; no further mutation is valid.
    Terminated,
}

/// Mutable state of a single triage session.
///
/// Invariants upheld by the controller:
/// - `asked_questions` only grows; depth (its size) never decreases.
/// - `repeat_streak` resets to 0 when a genuinely new question is accepted
///   and increments only on a detected verbatim repeat.
/// - No mutation happens after `phase` becomes `Terminated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Correlation token issued by the oracle on its first response.
    /// `None` until the opening round completes.
    pub session_id: Option<String>,
    /// The current case snapshot (device, symptom, answer history).
    pub case: Case,
    /// Question texts already shown to the user. Membership matters,
    /// insertion order does not.
    pub asked_questions: HashSet<String>,
    /// Consecutive rounds in which the oracle re-issued an already-asked
    /// question.
    pub repeat_streak: u32,
    /// Current phase.
    pub phase: Phase,
    /// Timestamp when the session was opened (ISO 8601 format).
    pub created_at: String,
    /// Timestamp of the last completed round (ISO 8601 format).
    pub updated_at: String,
}

impl SessionState {
    /// Creates a fresh session around an initial case.
    pub fn new(case: Case) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            session_id: None,
            case,
            asked_questions: HashSet::new(),
            repeat_streak: 0,
            phase: Phase::AwaitingAnswer,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Number of distinct questions asked so far.
    pub fn depth(&self) -> usize {
        self.asked_questions.len()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
