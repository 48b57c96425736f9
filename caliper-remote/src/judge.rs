//! The judge endpoint client.
//!
//! One POST per evaluation. Timeouts and connection failures come back
//! as retryable judge errors; 4xx responses come back as non-retryable
//! ones, since resending the same payload cannot help.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use caliper_core::errors::JudgeError;
use caliper_core::models::JudgeScore;
use caliper_core::traits::IJudge;
use caliper_core::Item;

/// Configuration for the judge transport.
#[derive(Debug, Clone)]
pub struct RemoteJudgeConfig {
    /// Base URL of the judge service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Optional bearer token for authenticated endpoints.
    pub api_key: Option<String>,
}

impl Default for RemoteJudgeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

/// What the judge endpoint returns for one item.
#[derive(Debug, Deserialize)]
struct EvaluationResponse {
    gestalt: f64,
    rationale: String,
}

/// `IJudge` over HTTP. Holds a connection-pooling client; cheap to
/// clone per task via the engine's `Arc`.
#[derive(Debug)]
pub struct HttpJudge {
    client: reqwest::Client,
    config: RemoteJudgeConfig,
}

impl HttpJudge {
    pub fn new(config: RemoteJudgeConfig) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JudgeError::Unavailable {
                message: format!("client construction failed: {e}"),
            })?;
        Ok(Self { client, config })
    }

    fn evaluate_url(&self) -> String {
        format!("{}/evaluate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IJudge for HttpJudge {
    async fn evaluate(&self, item: &Item) -> Result<JudgeScore, JudgeError> {
        let mut request = self.client.post(self.evaluate_url()).json(item);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                JudgeError::Timeout {
                    seconds: self.config.timeout_secs,
                }
            } else {
                JudgeError::Unavailable {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(JudgeError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let verdict: EvaluationResponse =
            response.json().await.map_err(|e| JudgeError::Malformed {
                message: e.to_string(),
            })?;
        debug!(item_id = %item.id, gestalt = verdict.gestalt, "judge verdict received");
        Ok(JudgeScore::new(verdict.gestalt, verdict.rationale))
    }
}
