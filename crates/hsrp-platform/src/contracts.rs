use chrono::{DateTime, Utc};
use hsrp_core::{BookingStatus, FieldIssue, NewBooking, VehicleCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub owner_full_name: String,
    pub owner_mobile: String,
    pub owner_email: String,
    pub owner_aadhaar: String,
    pub owner_address: String,
    pub owner_state: String,
    pub owner_pincode: String,
    pub vehicle_registration_number: String,
    pub engine_number: String,
    pub chassis_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub manufacturing_year: String,
    pub category: VehicleCategory,
    /// Accepted for wire compatibility with the booking UI, never trusted:
    /// the persisted total is recomputed from the category.
    #[serde(default)]
    pub total_amount: Option<i64>,
}

impl CreateBookingRequest {
    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            owner_full_name: self.owner_full_name,
            owner_mobile: self.owner_mobile,
            owner_email: self.owner_email,
            owner_aadhaar: self.owner_aadhaar,
            owner_address: self.owner_address,
            owner_state: self.owner_state,
            owner_pincode: self.owner_pincode,
            vehicle_registration_number: self.vehicle_registration_number,
            engine_number: self.engine_number,
            chassis_number: self.chassis_number,
            vehicle_make: self.vehicle_make,
            vehicle_model: self.vehicle_model,
            manufacturing_year: self.manufacturing_year,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: i64,
    pub order_id: String,
    pub amount: i32,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachProofRequest {
    pub order_id: String,
    pub proof_data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachProofResponse {
    pub booking_id: i64,
    pub order_id: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub new_status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub booking_id: i64,
    pub status: BookingStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub contact_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingItem {
    pub category: VehicleCategory,
    pub label: String,
    pub base_price: i64,
    pub processing_fee: i64,
    pub tax: i64,
    pub total: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

/// Published on [`crate::VERIFICATION_REQUESTED_CHANNEL`] strictly after
/// the `payment_pending_verification` update has committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequestedEvent {
    pub booking_id: i64,
    pub order_id: String,
    pub proof_ref: String,
    pub expected_amount: i32,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<FieldIssue>>,
}

impl ErrorBody {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            issues: None,
        }
    }

    pub fn with_issues(error: &str, issues: Vec<FieldIssue>) -> Self {
        Self {
            error: error.to_string(),
            issues: Some(issues),
        }
    }
}
