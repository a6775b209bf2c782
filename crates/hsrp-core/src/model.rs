use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow states for a booking. The payment states are driven by the
/// orchestrator and the verification worker; the production tail is
/// admin-driven and deliberately unconstrained (operators may move a
/// booking to any state).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    PaymentPendingVerification,
    PaymentVerified,
    PaymentRejected,
    PaymentVerificationFailed,
    UploadFailed,
    InProduction,
    QualityCheck,
    ReadyForDispatch,
    OutForDelivery,
    Delivered,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::PaymentPendingVerification => "payment_pending_verification",
            BookingStatus::PaymentVerified => "payment_verified",
            BookingStatus::PaymentRejected => "payment_rejected",
            BookingStatus::PaymentVerificationFailed => "payment_verification_failed",
            BookingStatus::UploadFailed => "upload_failed",
            BookingStatus::InProduction => "in_production",
            BookingStatus::QualityCheck => "quality_check",
            BookingStatus::ReadyForDispatch => "ready_for_dispatch",
            BookingStatus::OutForDelivery => "out_for_delivery",
            BookingStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "payment_pending_verification" => Ok(BookingStatus::PaymentPendingVerification),
            "payment_verified" => Ok(BookingStatus::PaymentVerified),
            "payment_rejected" => Ok(BookingStatus::PaymentRejected),
            "payment_verification_failed" => Ok(BookingStatus::PaymentVerificationFailed),
            "upload_failed" => Ok(BookingStatus::UploadFailed),
            "in_production" => Ok(BookingStatus::InProduction),
            "quality_check" => Ok(BookingStatus::QualityCheck),
            "ready_for_dispatch" => Ok(BookingStatus::ReadyForDispatch),
            "out_for_delivery" => Ok(BookingStatus::OutForDelivery),
            "delivered" => Ok(BookingStatus::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Bike,
    Car,
    Electric,
    Sticker,
    Heavy,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 5] = [
        VehicleCategory::Bike,
        VehicleCategory::Car,
        VehicleCategory::Electric,
        VehicleCategory::Sticker,
        VehicleCategory::Heavy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleCategory::Bike => "bike",
            VehicleCategory::Car => "car",
            VehicleCategory::Electric => "electric",
            VehicleCategory::Sticker => "sticker",
            VehicleCategory::Heavy => "heavy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleCategory::Bike => "Bike/Scooter",
            VehicleCategory::Car => "Car/SUV",
            VehicleCategory::Electric => "Electric Vehicle",
            VehicleCategory::Sticker => "Only Colour Sticker",
            VehicleCategory::Heavy => "Tractor & Trailer",
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bike" => Ok(VehicleCategory::Bike),
            "car" => Ok(VehicleCategory::Car),
            "electric" => Ok(VehicleCategory::Electric),
            "sticker" => Ok(VehicleCategory::Sticker),
            "heavy" => Ok(VehicleCategory::Heavy),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown vehicle category: {0}")]
pub struct UnknownCategory(pub String);

/// Owner and vehicle details submitted at booking time. Carries no amount:
/// the persisted total is always recomputed server-side from the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
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
}

impl NewBooking {
    /// Trims surrounding whitespace off every text field, so the same
    /// values flow to validation, persistence, and the caller's receipt.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.owner_full_name,
            &mut self.owner_mobile,
            &mut self.owner_email,
            &mut self.owner_aadhaar,
            &mut self.owner_address,
            &mut self.owner_state,
            &mut self.owner_pincode,
            &mut self.vehicle_registration_number,
            &mut self.engine_number,
            &mut self.chassis_number,
            &mut self.vehicle_make,
            &mut self.vehicle_model,
            &mut self.manufacturing_year,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

/// A booking ready for insertion: validated input plus the generated
/// order id, the server-computed amount, and initial workflow fields.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub order_id: String,
    pub details: NewBooking,
    pub amount: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDraft {
    pub fn new(details: NewBooking, order_id: String, amount: i32, now: DateTime<Utc>) -> Self {
        Self {
            order_id,
            details,
            amount,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The persisted booking row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub order_id: String,
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
    pub amount: i32,
    pub status: BookingStatus,
    pub payment_proof: Option<String>,
    pub verification_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_draft(id: i64, draft: &BookingDraft) -> Self {
        let details = draft.details.clone();
        Self {
            id,
            order_id: draft.order_id.clone(),
            owner_full_name: details.owner_full_name,
            owner_mobile: details.owner_mobile,
            owner_email: details.owner_email,
            owner_aadhaar: details.owner_aadhaar,
            owner_address: details.owner_address,
            owner_state: details.owner_state,
            owner_pincode: details.owner_pincode,
            vehicle_registration_number: details.vehicle_registration_number,
            engine_number: details.engine_number,
            chassis_number: details.chassis_number,
            vehicle_make: details.vehicle_make,
            vehicle_model: details.vehicle_model,
            manufacturing_year: details.manufacturing_year,
            category: details.category,
            amount: draft.amount,
            status: draft.status,
            payment_proof: None,
            verification_reason: None,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        let all = [
            BookingStatus::Pending,
            BookingStatus::PaymentPendingVerification,
            BookingStatus::PaymentVerified,
            BookingStatus::PaymentRejected,
            BookingStatus::PaymentVerificationFailed,
            BookingStatus::UploadFailed,
            BookingStatus::InProduction,
            BookingStatus::QualityCheck,
            BookingStatus::ReadyForDispatch,
            BookingStatus::OutForDelivery,
            BookingStatus::Delivered,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("shipped".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn category_round_trips_through_strings() {
        for category in VehicleCategory::ALL {
            assert_eq!(
                category.as_str().parse::<VehicleCategory>().unwrap(),
                category
            );
        }
    }
}
