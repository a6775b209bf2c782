use std::time::Duration;

use thiserror::Error;

use crate::validate::FieldIssue;

/// Failures surfaced by the booking store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order id already exists")]
    Conflict,
    #[error("booking not found")]
    NotFound,
    #[error("store backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Failures surfaced by the proof upload sink.
#[derive(Debug, Error)]
pub enum ProofSinkError {
    #[error("proof storage failure: {0}")]
    Io(String),
}

/// Failures of the verification oracle call itself, as opposed to a
/// negative verdict. Timeouts are not a rejection: no verdict was obtained.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle call timed out after {0:?}")]
    Timeout(Duration),
    #[error("oracle transport failure: {0}")]
    Transport(String),
    #[error("oracle returned a malformed response: {0}")]
    Malformed(String),
}

/// Caller-facing error taxonomy for booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation failed")]
    Validation(Vec<FieldIssue>),
    #[error("could not allocate a unique order id")]
    Conflict,
    #[error("booking not found")]
    NotFound,
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("payment proof upload failed: {0}")]
    Upload(String),
    #[error("verification failed: {0}")]
    Oracle(String),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => BookingError::Conflict,
            StoreError::NotFound => BookingError::NotFound,
            StoreError::Backend(source) => BookingError::Persistence(source.to_string()),
        }
    }
}
