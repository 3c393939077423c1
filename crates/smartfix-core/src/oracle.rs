//! The oracle seam.
//!
//! The session controller is generic over this trait so the transport can be
//! swapped out (HTTP in production, scripted mocks in tests).

use crate::case::Case;
use crate::error::Result;
use crate::verdict::Verdict;
use async_trait::async_trait;

/// The external reasoning service that drives the triage session.
///
/// The oracle is stateless between calls except for the correlation token it
/// issues on the first response: every call sends the full case (device,
/// symptom, entire answer history). One call is one network round-trip; a
/// transport failure surfaces as `SmartfixError::Transport` and is never
/// retried here.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Sends the case to the oracle and returns its normalized verdict.
    ///
    /// `session_id` is `None` on the opening call only; afterwards the token
    /// from the first response is carried unchanged.
    async fn ask(&self, case: &Case, session_id: Option<&str>) -> Result<Verdict>;
}
