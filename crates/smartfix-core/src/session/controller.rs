//! Session progression state machine.
//!
//! `SessionController` owns the `SessionState` for one triage session and
//! decides, after each answer, whether to keep questioning, terminate with a
//! report, or terminate with a fallback. It is the only place the
//! termination rules live.

use super::limits::SessionLimits;
use super::model::{Phase, SessionState};
use super::outcome::{RoundOutcome, TerminalOutcome, UnableReason};
use crate::case::{Answer, Case, Device, QaPair};
use crate::error::{Result, SmartfixError};
use crate::oracle::Oracle;
use crate::verdict::Verdict;

/// Drives one triage session from the opening symptom to a terminal outcome.
///
/// The controller is generic over the [`Oracle`] seam. All methods take
/// `&mut self`, so a round can never be double-submitted while another is in
/// flight: the borrow checker enforces the "one round at a time" contract.
///
/// Termination rules, applied after every oracle round in precedence order:
///
/// 1. An explicit `FinalReport` from the oracle always wins.
/// 2. A `Malformed` reply terminates with [`UnableReason::InvalidResponse`].
/// 3. If the depth limit is reached while the oracle wants another
///    follow-up, terminate with [`UnableReason::MaxDepth`].
/// 4. A verbatim-repeated question is answered `unknown` on the user's
///    behalf, up to `max_repeat` consecutive times, then terminates with
///    [`UnableReason::Repeat`]. The repeated question is never re-displayed.
/// 5. Otherwise the new question is recorded and shown to the user.
pub struct SessionController<O: Oracle> {
    oracle: O,
    limits: SessionLimits,
    state: SessionState,
    /// The question currently displayed to the user, if any.
    current_question: Option<String>,
    outcome: Option<TerminalOutcome>,
}

impl<O: Oracle> SessionController<O> {
    /// Creates a controller for a fresh case. No oracle call happens yet;
    /// call [`start`](Self::start) to obtain the first question.
    pub fn new(oracle: O, device: Device, symptom: impl Into<String>, limits: SessionLimits) -> Self {
        Self {
            oracle,
            limits,
            state: SessionState::new(Case::new(device, symptom)),
            current_question: None,
            outcome: None,
        }
    }

    /// Read access to the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The question awaiting an answer, if the session is mid-flight.
    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    /// The terminal outcome, once the session has terminated.
    pub fn outcome(&self) -> Option<&TerminalOutcome> {
        self.outcome.as_ref()
    }

    /// Opens the session: sends the initial case (empty history, no session
    /// id) to the oracle and captures the correlation token it issues.
    ///
    /// The oracle may diagnose immediately, in which case the session
    /// terminates with depth 0. A transport failure leaves the session
    /// unstarted; `start` may simply be called again.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session has already started or terminated;
    /// `Transport` if the oracle round-trip failed.
    pub async fn start(&mut self) -> Result<RoundOutcome> {
        self.ensure_awaiting()?;
        if self.current_question.is_some() || !self.state.case.history.is_empty() {
            return Err(SmartfixError::invalid_state("session already started"));
        }

        let verdict = self.oracle.ask(&self.state.case, None).await?;
        self.state.touch();

        match verdict {
            Verdict::FollowUp { session_id, question } => {
                tracing::debug!(target: "session", %session_id, "session opened");
                self.state.session_id = Some(session_id);
                self.state.asked_questions.insert(question.clone());
                self.current_question = Some(question.clone());
                Ok(RoundOutcome::NextQuestion(question))
            }
            Verdict::FinalReport { session_id, report } => {
                tracing::debug!(target: "session", %session_id, "oracle diagnosed without questions");
                self.state.session_id = Some(session_id);
                Ok(self.finish(TerminalOutcome::Report(report)))
            }
            Verdict::Malformed { raw } => {
                tracing::warn!(target: "session", raw_len = raw.len(), "unusable oracle reply on open");
                Ok(self.finish(TerminalOutcome::Unable {
                    reason: UnableReason::InvalidResponse,
                }))
            }
        }
    }

    /// Submits the user's answer to the currently displayed question and
    /// runs the round to its resolution.
    ///
    /// Repeated questions are auto-resubmitted with `unknown` in a bounded
    /// loop; every iteration re-applies the report and depth rules first, so
    /// auto-retry cannot bypass them.
    ///
    /// State is committed only when the round resolves: a transport failure
    /// anywhere leaves the session exactly as it was, and the same answer
    /// can be resubmitted without duplicating history.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is terminated or not started;
    /// `Transport` if an oracle round-trip failed.
    pub async fn submit_answer(&mut self, answer: Answer) -> Result<RoundOutcome> {
        self.ensure_awaiting()?;
        let Some(mut question) = self.current_question.clone() else {
            return Err(SmartfixError::invalid_state(
                "no question is awaiting an answer; call start first",
            ));
        };

        // Candidate state for this round; committed only on resolution.
        let mut case = self.state.case.clone();
        let mut streak = self.state.repeat_streak;
        let mut answer = answer;

        loop {
            case.history.push(QaPair {
                question: question.clone(),
                answer,
            });

            let verdict = self
                .oracle
                .ask(&case, self.state.session_id.as_deref())
                .await?;

            match verdict {
                Verdict::FinalReport { report, .. } => {
                    self.commit(case, 0);
                    return Ok(self.finish(TerminalOutcome::Report(report)));
                }
                Verdict::Malformed { raw } => {
                    tracing::warn!(target: "session", raw_len = raw.len(), "unusable oracle reply");
                    self.commit(case, streak);
                    return Ok(self.finish(TerminalOutcome::Unable {
                        reason: UnableReason::InvalidResponse,
                    }));
                }
                Verdict::FollowUp { question: next, .. } => {
                    if self.state.depth() >= self.limits.max_depth {
                        tracing::debug!(
                            target: "session",
                            depth = self.state.depth(),
                            "depth limit reached, overriding follow-up"
                        );
                        self.commit(case, streak);
                        return Ok(self.finish(TerminalOutcome::Unable {
                            reason: UnableReason::MaxDepth,
                        }));
                    }

                    if self.state.asked_questions.contains(&next) {
                        streak += 1;
                        tracing::debug!(target: "session", streak, "oracle repeated a question");
                        if streak >= self.limits.max_repeat {
                            self.commit(case, streak);
                            return Ok(self.finish(TerminalOutcome::Unable {
                                reason: UnableReason::Repeat,
                            }));
                        }
                        // Answer the repeat as `unknown` on the user's
                        // behalf and give the oracle another chance.
                        question = next;
                        answer = Answer::Unknown;
                        continue;
                    }

                    self.commit(case, 0);
                    self.state.asked_questions.insert(next.clone());
                    self.current_question = Some(next.clone());
                    tracing::debug!(target: "session", depth = self.state.depth(), "next question accepted");
                    return Ok(RoundOutcome::NextQuestion(next));
                }
            }
        }
    }

    fn ensure_awaiting(&self) -> Result<()> {
        match self.state.phase {
            Phase::AwaitingAnswer => Ok(()),
            Phase::Terminated => Err(SmartfixError::invalid_state(
                "session already terminated; no further answers are accepted",
            )),
        }
    }

    fn commit(&mut self, case: Case, streak: u32) {
        self.state.case = case;
        self.state.repeat_streak = streak;
        self.state.touch();
    }

    fn finish(&mut self, outcome: TerminalOutcome) -> RoundOutcome {
        self.state.phase = Phase::Terminated;
        self.current_question = None;
        self.outcome = Some(outcome.clone());
        RoundOutcome::Finished(outcome)
    }
}
