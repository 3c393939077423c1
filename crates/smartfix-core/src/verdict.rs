//! Oracle verdict types and the verdict parser.
//!
//! The oracle replies with a `follow_up_needed`-discriminated JSON object
//! (see `HttpOracle` for the request side). This module normalizes that raw
//! text into the `Verdict` sum type so the session controller can match
//! exhaustively instead of probing optional fields. Anything that fails
//! structural decoding *or* the numeric probability contract becomes
//! `Verdict::Malformed`; the parser never raises.

use serde::{Deserialize, Serialize};

/// One candidate cause in a final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Short human-readable cause name.
    pub name: String,
    /// Probability in percent, an integer in 1..=100.
    pub prob: u8,
}

/// The oracle's recommended follow-up action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    CallSupport,
    Replace,
    Monitor,
}

/// The oracle's final diagnostic report.
///
/// The probability contract (each cause an integer in 1..=100, all causes
/// summing to exactly 100) is stated to the oracle on request and re-validated
/// here on receipt; a report violating it is normalized to
/// `Verdict::Malformed` rather than silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Candidate causes. Not guaranteed pre-sorted by the oracle.
    pub causes: Vec<Cause>,
    /// Remedies the user can try themselves.
    #[serde(rename = "diy_fix")]
    pub diy_fixes: Vec<String>,
    /// Recommended follow-up action.
    pub action: RecommendedAction,
}

impl FinalReport {
    /// Whether the cause probabilities honor the numeric contract.
    pub fn probabilities_valid(&self) -> bool {
        !self.causes.is_empty()
            && self.causes.iter().all(|c| (1..=100).contains(&c.prob))
            && self.causes.iter().map(|c| u32::from(c.prob)).sum::<u32>() == 100
    }

    /// Causes sorted by descending probability, for presentation.
    /// The stored order is preserved.
    pub fn causes_by_probability(&self) -> Vec<&Cause> {
        let mut sorted: Vec<&Cause> = self.causes.iter().collect();
        sorted.sort_by(|a, b| b.prob.cmp(&a.prob));
        sorted
    }
}

/// The normalized result of one oracle round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The oracle wants one more yes/no/unknown question answered.
    FollowUp {
        /// Correlation token issued by the oracle; echoed on later requests.
        session_id: String,
        /// The question to show the user.
        question: String,
    },
    /// The oracle committed to a final diagnostic report.
    FinalReport {
        session_id: String,
        report: FinalReport,
    },
    /// The oracle's output was not usable. Raw text is kept for logging
    /// only; it must never reach the presentation layer.
    Malformed { raw: String },
}

/// Raw wire shape of an oracle response, before normalization.
#[derive(Deserialize)]
struct WireResponse {
    follow_up_needed: bool,
    #[serde(rename = "sessionId")]
    session_id: String,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    final_report: Option<FinalReport>,
}

impl Verdict {
    /// Parses raw oracle output into a verdict.
    ///
    /// Strict structured decoding is attempted first; any structural or
    /// numeric violation yields `Verdict::Malformed` carrying the raw text.
    pub fn parse(raw: &str) -> Verdict {
        let wire: WireResponse = match serde_json::from_str(raw) {
            Ok(wire) => wire,
            Err(err) => {
                tracing::warn!(target: "verdict", "oracle reply failed to decode: {err}");
                return Verdict::Malformed {
                    raw: raw.to_string(),
                };
            }
        };

        match (wire.follow_up_needed, wire.question, wire.final_report) {
            (true, Some(question), _) => Verdict::FollowUp {
                session_id: wire.session_id,
                question,
            },
            (false, _, Some(report)) if report.probabilities_valid() => Verdict::FinalReport {
                session_id: wire.session_id,
                report,
            },
            (false, _, Some(_)) => {
                tracing::warn!(target: "verdict", "final report violates the probability contract");
                Verdict::Malformed {
                    raw: raw.to_string(),
                }
            }
            _ => {
                tracing::warn!(target: "verdict", "oracle reply is missing its payload field");
                Verdict::Malformed {
                    raw: raw.to_string(),
                }
            }
        }
    }
}
