use serde::{Deserialize, Serialize};

use crate::model::NewBooking;

/// One field-level validation problem, reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Indian mobile number: exactly 10 digits, leading digit 6-9.
pub fn is_valid_mobile(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('6'..='9'))
        && value.len() == 10
        && chars.all(|c| c.is_ascii_digit())
}

/// Aadhaar number: exactly 12 digits.
pub fn is_valid_aadhaar(value: &str) -> bool {
    value.len() == 12 && value.chars().all(|c| c.is_ascii_digit())
}

/// Postal pincode: exactly 6 digits.
pub fn is_valid_pincode(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_digit())
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() > 2
}

fn require_non_empty(issues: &mut Vec<FieldIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(field, "is required"));
    }
}

/// Validates a booking submission, collecting every problem rather than
/// stopping at the first.
pub fn check_booking_input(input: &NewBooking) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();

    require_non_empty(&mut issues, "owner_full_name", &input.owner_full_name);
    require_non_empty(&mut issues, "owner_address", &input.owner_address);
    require_non_empty(&mut issues, "owner_state", &input.owner_state);
    require_non_empty(
        &mut issues,
        "vehicle_registration_number",
        &input.vehicle_registration_number,
    );
    require_non_empty(&mut issues, "engine_number", &input.engine_number);
    require_non_empty(&mut issues, "chassis_number", &input.chassis_number);
    require_non_empty(&mut issues, "vehicle_make", &input.vehicle_make);
    require_non_empty(&mut issues, "vehicle_model", &input.vehicle_model);
    require_non_empty(&mut issues, "manufacturing_year", &input.manufacturing_year);

    if !is_valid_mobile(&input.owner_mobile) {
        issues.push(FieldIssue::new(
            "owner_mobile",
            "must be a 10 digit mobile number starting with 6-9",
        ));
    }
    if !is_valid_email(&input.owner_email) {
        issues.push(FieldIssue::new("owner_email", "must be a valid email"));
    }
    if !is_valid_aadhaar(&input.owner_aadhaar) {
        issues.push(FieldIssue::new("owner_aadhaar", "must be 12 digits"));
    }
    if !is_valid_pincode(&input.owner_pincode) {
        issues.push(FieldIssue::new("owner_pincode", "must be 6 digits"));
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
