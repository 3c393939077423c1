//! Terminal and per-round outcomes.

use crate::verdict::FinalReport;
use serde::{Deserialize, Serialize};

/// Why a session ended without a diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnableReason {
    /// The distinct-question limit was reached while the oracle still
    /// wanted follow-ups.
    MaxDepth,
    /// The oracle kept re-issuing an already-asked question.
    Repeat,
    /// The oracle's reply failed structural or numeric validation.
    InvalidResponse,
}

/// What the session ultimately hands to the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminalOutcome {
    /// The oracle committed to a diagnostic report.
    Report(FinalReport),
    /// The session gave up; `reason` selects the explanation shown.
    Unable { reason: UnableReason },
}

/// Result of one user-visible round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The session continues; show this question next.
    NextQuestion(String),
    /// The session terminated with this outcome.
    Finished(TerminalOutcome),
}
