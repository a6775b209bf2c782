pub mod config;
pub mod contracts;
pub mod db;
pub mod redis_bus;
pub mod sink;
pub mod store;

pub use config::{OracleConfig, ProofStoreConfig, ServiceConfig};
pub use contracts::{
    AttachProofRequest, AttachProofResponse, ContactRequest, ContactResponse,
    CreateBookingRequest, CreateBookingResponse, ErrorBody, ListResponse, PricingItem,
    UpdateStatusRequest, UpdateStatusResponse, VerificationRequestedEvent,
};
pub use db::connect_database;
pub use redis_bus::{RedisBus, VERIFICATION_REQUESTED_CHANNEL};
pub use sink::FsProofSink;
pub use store::PgBookingStore;
