use crate::model::VehicleCategory;

/// Flat processing fee added to every booking, in rupees.
pub const PROCESSING_FEE: i64 = 50;

/// GST applied to base price plus processing fee.
pub const TAX_RATE_PERCENT: i64 = 18;

impl VehicleCategory {
    pub fn base_price(self) -> i64 {
        match self {
            VehicleCategory::Bike => 450,
            VehicleCategory::Car => 1200,
            VehicleCategory::Electric => 800,
            VehicleCategory::Sticker => 200,
            VehicleCategory::Heavy => 2500,
        }
    }
}

/// Tax on the fee-inclusive subtotal, rounded half-up to the nearest rupee.
pub fn tax_amount(category: VehicleCategory) -> i64 {
    let subtotal = category.base_price() + PROCESSING_FEE;
    (subtotal * TAX_RATE_PERCENT + 50) / 100
}

/// Total payable for a category. This value is fixed at creation time and
/// is the only amount ever persisted or handed to the verification oracle.
pub fn quote_amount(category: VehicleCategory) -> i32 {
    let subtotal = category.base_price() + PROCESSING_FEE;
    (subtotal + tax_amount(category)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_quote_matches_published_total() {
        // 1200 + 50 = 1250, tax round(0.18 * 1250) = 225, total 1475
        assert_eq!(quote_amount(VehicleCategory::Car), 1475);
    }

    #[test]
    fn quotes_cover_fee_and_tax_for_every_category() {
        assert_eq!(quote_amount(VehicleCategory::Bike), 590);
        assert_eq!(quote_amount(VehicleCategory::Electric), 1003);
        assert_eq!(quote_amount(VehicleCategory::Sticker), 295);
        assert_eq!(quote_amount(VehicleCategory::Heavy), 3009);
    }

    #[test]
    fn tax_is_rounded_half_up() {
        // 0.18 * 2550 = 459.0 exactly; half-up must not drift by a rupee
        assert_eq!(tax_amount(VehicleCategory::Heavy), 459);
        assert_eq!(tax_amount(VehicleCategory::Car), 225);
    }
}
