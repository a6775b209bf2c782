pub mod error;
pub mod model;
pub mod oracle;
pub mod orchestrator;
pub mod order_id;
pub mod pricing;
pub mod proof;
pub mod queries;
pub mod store;
pub mod validate;
pub mod worker;

pub use error::{BookingError, OracleError, ProofSinkError, StoreError};
pub use model::{Booking, BookingDraft, BookingStatus, NewBooking, VehicleCategory};
pub use oracle::{VerificationJob, VerificationOracle, Verdict};
pub use orchestrator::{BookingReceipt, BookingService};
pub use order_id::OrderIdGenerator;
pub use proof::{ProofImage, ProofSink};
pub use queries::BookingQueries;
pub use store::{BookingStore, StatusUpdate};
pub use validate::FieldIssue;
pub use worker::VerificationWorker;
