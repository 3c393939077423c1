//! HTTP client for the diagnosis oracle.
//!
//! One `ask` is one POST of the full case to the diagnose endpoint. The body
//! carries the structured history plus `historyMsgs`, a two-role transcript
//! derived from it at this boundary for the oracle's convenience; the
//! transcript is never stored in session state.

use crate::config::OracleConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use smartfix_core::case::{Case, QaPair};
use smartfix_core::error::{Result, SmartfixError};
use smartfix_core::oracle::Oracle;
use smartfix_core::verdict::Verdict;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// How much of an error body to keep in the error message.
const ERROR_BODY_LIMIT: usize = 512;

/// `Oracle` implementation that talks to the diagnose endpoint over HTTP.
#[derive(Clone)]
pub struct HttpOracle {
    client: Client,
    endpoint: String,
}

impl HttpOracle {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// `Config` if the underlying HTTP client cannot be constructed.
    pub fn new(config: OracleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| SmartfixError::config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// Creates a client configured from environment variables.
    pub fn try_from_env() -> Result<Self> {
        Self::new(OracleConfig::try_from_env()?)
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn ask(&self, case: &Case, session_id: Option<&str>) -> Result<Verdict> {
        let request_id = Uuid::new_v4();
        let body = DiagnoseRequest {
            session_id,
            payload: case,
            history_msgs: transcript(&case.history),
        };

        tracing::debug!(
            target: "oracle",
            %request_id,
            history_len = case.history.len(),
            "sending diagnose request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|err| SmartfixError::transport(format!("oracle request failed: {err}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            SmartfixError::transport(format!("failed to read oracle response body: {err}"))
        })?;

        if !status.is_success() {
            tracing::warn!(target: "oracle", %request_id, status = status.as_u16(), "oracle returned an error status");
            return Err(SmartfixError::transport_status(
                status.as_u16(),
                truncate(&text, ERROR_BODY_LIMIT),
            ));
        }

        Ok(Verdict::parse(&text))
    }
}

/// Wire shape of a diagnose request, matching the oracle's API.
#[derive(Serialize)]
struct DiagnoseRequest<'a> {
    #[serde(rename = "sessionId")]
    session_id: Option<&'a str>,
    payload: &'a Case,
    #[serde(rename = "historyMsgs")]
    history_msgs: Vec<TranscriptMessage<'a>>,
}

/// One line of the derived two-role transcript.
#[derive(Serialize)]
struct TranscriptMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Flattens the structured history into an assistant/user transcript.
fn transcript(history: &[QaPair]) -> Vec<TranscriptMessage<'_>> {
    history
        .iter()
        .flat_map(|pair| {
            [
                TranscriptMessage {
                    role: "assistant",
                    content: &pair.question,
                },
                TranscriptMessage {
                    role: "user",
                    content: pair.answer.as_str(),
                },
            ]
        })
        .collect()
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        text.to_string()
    } else {
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartfix_core::case::{Answer, Device};

    fn sample_case() -> Case {
        let mut case = Case::new(Device::Refrigerator, "no cooling");
        case.history.push(QaPair {
            question: "Is the compressor making noise?".to_string(),
            answer: Answer::No,
        });
        case
    }

    #[test]
    fn request_body_uses_the_oracle_wire_casing() {
        let case = sample_case();
        let body = DiagnoseRequest {
            session_id: Some("s-1"),
            payload: &case,
            history_msgs: transcript(&case.history),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["sessionId"], "s-1");
        assert_eq!(value["payload"]["device"], "refrigerator");
        assert_eq!(value["payload"]["history"][0]["answer"], "no");
        assert_eq!(value["historyMsgs"][0]["role"], "assistant");
        assert_eq!(
            value["historyMsgs"][0]["content"],
            "Is the compressor making noise?"
        );
        assert_eq!(value["historyMsgs"][1]["role"], "user");
        assert_eq!(value["historyMsgs"][1]["content"], "no");
    }

    #[test]
    fn opening_request_has_a_null_session_id() {
        let case = Case::new(Device::WashingMachine, "leaking");
        let body = DiagnoseRequest {
            session_id: None,
            payload: &case,
            history_msgs: transcript(&case.history),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value["sessionId"].is_null());
        assert_eq!(value["historyMsgs"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn transcript_alternates_roles_per_pair() {
        let mut case = sample_case();
        case.history.push(QaPair {
            question: "Is the door fully closed?".to_string(),
            answer: Answer::Yes,
        });

        let lines = transcript(&case.history);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].role, "assistant");
        assert_eq!(lines[3].content, "yes");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "エラーが発生しました".repeat(100);
        let short = truncate(&text, ERROR_BODY_LIMIT);
        assert!(short.len() <= ERROR_BODY_LIMIT + '…'.len_utf8());
    }
}
