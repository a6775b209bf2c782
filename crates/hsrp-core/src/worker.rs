use tracing::{info, warn};

use crate::error::BookingError;
use crate::model::BookingStatus;
use crate::oracle::{VerificationJob, VerificationOracle};
use crate::store::{BookingStore, StatusUpdate};

/// Stored when no verdict could be obtained. Deliberately generic: the raw
/// oracle error goes to the log, not to the booking record.
pub const VERDICT_UNAVAILABLE_REASON: &str =
    "Could not obtain a verification verdict. The payment proof will be reviewed manually.";

/// Resolves queued verification jobs against the oracle and persists the
/// outcome. Every job ends in exactly one of the three terminal payment
/// states; an oracle failure is recorded as `payment_verification_failed`,
/// which is explicitly not a rejection.
pub struct VerificationWorker<S, O> {
    store: S,
    oracle: O,
}

impl<S, O> VerificationWorker<S, O>
where
    S: BookingStore,
    O: VerificationOracle,
{
    pub fn new(store: S, oracle: O) -> Self {
        Self { store, oracle }
    }

    pub async fn process(&self, job: &VerificationJob) -> Result<BookingStatus, BookingError> {
        let (status, reason) = match self.oracle.verify(job).await {
            Ok(verdict) => {
                let status = if verdict.is_verified {
                    BookingStatus::PaymentVerified
                } else {
                    BookingStatus::PaymentRejected
                };
                (status, verdict.reason)
            }
            Err(err) => {
                warn!(order_id = %job.order_id, "oracle call failed: {err}");
                (
                    BookingStatus::PaymentVerificationFailed,
                    VERDICT_UNAVAILABLE_REASON.to_string(),
                )
            }
        };

        self.store
            .update_status(job.booking_id, StatusUpdate::with_reason(status, &reason))
            .await?;
        info!(order_id = %job.order_id, status = %status, "verification resolved");
        Ok(status)
    }
}
