use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::BookingError;
use crate::model::{BookingDraft, BookingStatus, NewBooking};
use crate::oracle::VerificationJob;
use crate::order_id::OrderIdGenerator;
use crate::pricing;
use crate::proof::{ProofImage, ProofSink};
use crate::store::{BookingStore, StatusUpdate};
use crate::validate;

/// How many fresh order ids to try before giving up on a create. With
/// monotonic millisecond ids a collision means another process raced us,
/// so one regenerate is normally enough.
const ORDER_ID_ATTEMPTS: usize = 3;

/// Synchronous result of a booking submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking_id: i64,
    pub order_id: String,
    pub amount: i32,
    pub status: BookingStatus,
}

/// Drives the booking lifecycle: creation, proof attachment, and admin
/// overrides. Verification itself runs elsewhere ([`crate::worker`]); this
/// service only guarantees the booking is in `payment_pending_verification`
/// with its proof reference committed before a job is handed out.
pub struct BookingService<S, P> {
    store: S,
    sink: P,
    order_ids: Arc<OrderIdGenerator>,
}

impl<S: Clone, P: Clone> Clone for BookingService<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            sink: self.sink.clone(),
            order_ids: Arc::clone(&self.order_ids),
        }
    }
}

impl<S, P> BookingService<S, P>
where
    S: BookingStore,
    P: ProofSink,
{
    pub fn new(store: S, sink: P) -> Self {
        Self {
            store,
            sink,
            order_ids: Arc::new(OrderIdGenerator::new()),
        }
    }

    /// Validates the submission, prices it server-side, and persists it
    /// with status `pending`. No partial booking is left behind on any
    /// failure path.
    pub async fn create_booking(&self, input: NewBooking) -> Result<BookingReceipt, BookingError> {
        let input = input.normalized();
        validate::check_booking_input(&input).map_err(BookingError::Validation)?;

        let amount = pricing::quote_amount(input.category);
        let mut attempts = 0;
        loop {
            let order_id = self.order_ids.next();
            let draft = BookingDraft::new(input.clone(), order_id, amount, Utc::now());
            match self.store.insert(&draft).await {
                Ok(booking) => {
                    info!(
                        order_id = %booking.order_id,
                        amount,
                        "booking created"
                    );
                    return Ok(BookingReceipt {
                        booking_id: booking.id,
                        order_id: booking.order_id,
                        amount: booking.amount,
                        status: booking.status,
                    });
                }
                Err(crate::error::StoreError::Conflict) => {
                    attempts += 1;
                    if attempts >= ORDER_ID_ATTEMPTS {
                        return Err(BookingError::Conflict);
                    }
                    warn!(attempts, "order id collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Uploads the proof and flips the booking to
    /// `payment_pending_verification`. Returns the verification job to
    /// dispatch; the returned job must only be handed to the verification
    /// path after this call succeeds, which is what keeps the worker from
    /// ever observing a `pending` booking.
    ///
    /// A sink failure moves the booking to `upload_failed` and is reported
    /// to the caller; no verification job exists in that case.
    pub async fn attach_payment_proof(
        &self,
        booking_id: i64,
        order_id: &str,
        proof_data_uri: &str,
    ) -> Result<VerificationJob, BookingError> {
        let booking = self
            .store
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?;
        if booking.order_id != order_id {
            return Err(BookingError::NotFound);
        }

        let image = ProofImage::from_data_uri(proof_data_uri).map_err(|err| {
            BookingError::Validation(vec![validate::FieldIssue::new(
                "proof_data_uri",
                &err.to_string(),
            )])
        })?;

        match self.sink.store_proof(&booking.order_id, &image).await {
            Ok(proof_ref) => {
                self.store
                    .update_status(booking_id, StatusUpdate::awaiting_verification(&proof_ref))
                    .await?;
                info!(order_id = %booking.order_id, proof_ref = %proof_ref, "payment proof attached");
                Ok(VerificationJob {
                    booking_id,
                    order_id: booking.order_id,
                    proof_ref,
                    expected_amount: booking.amount,
                })
            }
            Err(err) => {
                let reason = format!("Payment proof upload failed: {err}");
                if let Err(update_err) = self
                    .store
                    .update_status(
                        booking_id,
                        StatusUpdate::with_reason(BookingStatus::UploadFailed, &reason),
                    )
                    .await
                {
                    warn!(order_id = %booking.order_id, "could not record upload failure: {update_err}");
                }
                Err(BookingError::Upload(err.to_string()))
            }
        }
    }

    /// Admin escape hatch: sets any enumerated status directly, with no
    /// transition-graph enforcement, and stamps `updated_at`.
    pub async fn admin_set_status(
        &self,
        booking_id: i64,
        new_status: BookingStatus,
    ) -> Result<DateTime<Utc>, BookingError> {
        let update = StatusUpdate::status_only(new_status);
        let updated_at = update.updated_at;
        self.store.update_status(booking_id, update).await?;
        info!(booking_id, status = %new_status, "admin status override");
        Ok(updated_at)
    }
}
