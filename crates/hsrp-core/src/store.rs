use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{Booking, BookingDraft, BookingStatus};

/// Partial status update applied to one booking row. Absent fields keep
/// their current value; `updated_at` is always stamped.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: BookingStatus,
    pub verification_reason: Option<String>,
    pub payment_proof: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StatusUpdate {
    pub fn status_only(status: BookingStatus) -> Self {
        Self {
            status,
            verification_reason: None,
            payment_proof: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_reason(status: BookingStatus, reason: &str) -> Self {
        Self {
            status,
            verification_reason: Some(reason.to_string()),
            payment_proof: None,
            updated_at: Utc::now(),
        }
    }

    pub fn awaiting_verification(proof_ref: &str) -> Self {
        Self {
            status: BookingStatus::PaymentPendingVerification,
            verification_reason: Some("Awaiting verification".to_string()),
            payment_proof: Some(proof_ref.to_string()),
            updated_at: Utc::now(),
        }
    }
}

/// Durable record of bookings, one row per order.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a draft. Fails with `StoreError::Conflict` when the order
    /// id is already taken.
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, StoreError>;

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, StoreError>;

    /// All bookings for a mobile number, newest first.
    async fn find_by_mobile(&self, mobile: &str) -> Result<Vec<Booking>, StoreError>;

    /// Applies a partial update; `StoreError::NotFound` when the id is absent.
    async fn update_status(&self, id: i64, update: StatusUpdate) -> Result<(), StoreError>;

    /// Full dump for the admin view, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, StoreError>;
}
