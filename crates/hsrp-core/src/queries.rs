use crate::error::BookingError;
use crate::model::Booking;
use crate::store::BookingStore;
use crate::validate::{self, FieldIssue};

/// Read side: order tracking and the admin listing. No coordination with
/// the orchestrator is needed, these are plain point and range reads.
pub struct BookingQueries<S> {
    store: S,
}

impl<S: Clone> Clone for BookingQueries<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: BookingStore> BookingQueries<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Single-order lookup for tracking by order id.
    pub async fn track(&self, order_id: &str) -> Result<Booking, BookingError> {
        self.store
            .find_by_order_id(order_id)
            .await?
            .ok_or(BookingError::NotFound)
    }

    /// All bookings for a mobile number, newest first. A mobile that
    /// matches nothing is an empty list, not an error; a malformed mobile
    /// is a validation error.
    pub async fn track_by_mobile(&self, mobile: &str) -> Result<Vec<Booking>, BookingError> {
        if !validate::is_valid_mobile(mobile) {
            return Err(BookingError::Validation(vec![FieldIssue::new(
                "mobile",
                "must be a 10 digit mobile number starting with 6-9",
            )]));
        }
        Ok(self.store.find_by_mobile(mobile).await?)
    }

    /// Full dump for the admin dashboard, newest first.
    pub async fn list_for_admin(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.store.list_all().await?)
    }
}
