use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use hsrp_core::{OracleError, VerificationJob, VerificationOracle, Verdict};
use serde::{Deserialize, Serialize};

use hsrp_platform::OracleConfig;

#[derive(Debug, Serialize)]
struct OracleRequest<'a> {
    proof_image_ref: &'a str,
    expected_amount: i32,
    order_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct OracleResponse {
    is_verified: bool,
    reason: String,
}

/// Calls the generative-AI verification endpoint over HTTP. The whole
/// request is bounded by the configured timeout; a timeout yields
/// `OracleError::Timeout`, which the worker records as
/// `payment_verification_failed` rather than a rejection.
pub struct HttpVerificationOracle {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpVerificationOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl VerificationOracle for HttpVerificationOracle {
    async fn verify(&self, job: &VerificationJob) -> Result<Verdict, OracleError> {
        let request = OracleRequest {
            proof_image_ref: &job.proof_ref,
            expected_amount: job.expected_amount,
            order_id: &job.order_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    OracleError::Timeout(self.timeout)
                } else {
                    OracleError::Transport(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(OracleError::Transport(format!(
                "oracle answered with status {}",
                response.status()
            )));
        }

        let body: OracleResponse = response
            .json()
            .await
            .map_err(|err| OracleError::Malformed(err.to_string()))?;

        Ok(Verdict {
            is_verified: body.is_verified,
            reason: body.reason,
        })
    }
}
