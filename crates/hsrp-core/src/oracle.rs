use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// One queued verification: everything the oracle needs, captured at the
/// moment the proof attach committed. `expected_amount` is the
/// server-computed booking total, never a client figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationJob {
    pub booking_id: i64,
    pub order_id: String,
    pub proof_ref: String,
    pub expected_amount: i32,
}

/// The oracle's answer: a boolean outcome plus its explanation, stored
/// verbatim on the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub is_verified: bool,
    pub reason: String,
}

/// External payment-proof classifier. Treated as slow (seconds) and as
/// allowed to fail outright; a failed call is not a rejection.
#[async_trait]
pub trait VerificationOracle: Send + Sync {
    async fn verify(&self, job: &VerificationJob) -> Result<Verdict, OracleError>;
}
