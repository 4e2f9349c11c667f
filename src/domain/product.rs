//! Product entity and the input/filter shapes around it
//!
//! A product is exclusively owned by one restaurant (`restaurant_id`).
//! Price and quantity are persisted as numeric strings; arithmetic happens
//! on `rust_decimal::Decimal` and values are re-serialized only at the
//! storage boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::errors::ProductError;
use crate::domain::validation::{parse_expire_date, parse_numeric_string, validate_date_format};

/// Persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub price: String,
    pub quantity: String,
    pub category: String,
    /// Stored as given: `YYYY-MM-DD` or `DD.MM.YYYY`.
    pub expire_date: Option<String>,
    pub restaurant_id: i64,
}

impl Product {
    /// True iff the stored expiration date is strictly before `today`.
    ///
    /// Absent date means not expired. An unparsable stored date also reports
    /// not expired: the fail-open branch is deliberate policy for a field
    /// whose format was never normalized.
    pub fn is_expired_as_of(&self, today: NaiveDate) -> bool {
        let Some(expire_date) = self.expire_date.as_deref() else {
            return false;
        };

        match parse_expire_date(expire_date) {
            Some(date) => date < today,
            None => {
                warn!(
                    product_id = self.id,
                    expire_date, "unparsable expire_date, treating as not expired"
                );
                false
            }
        }
    }
}

/// Input for product creation. Validated before it reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub price: String,
    pub quantity: String,
    pub category: String,
    pub expire_date: Option<String>,
    pub restaurant_id: i64,
}

impl NewProduct {
    /// Full-field validation: numeric strings must parse, a present
    /// expiration date must match one of the two accepted formats.
    pub fn validate(&self) -> Result<(), ProductError> {
        parse_numeric_string("price", &self.price)?;
        parse_numeric_string("quantity", &self.quantity)?;
        validate_date_format(self.expire_date.as_deref())?;
        Ok(())
    }
}

/// Partial update: `None` means "leave the field as is". Fields that are
/// present get re-validated by the repository before persisting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub expire_date: Option<String>,
    pub restaurant_id: Option<i64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.expire_date.is_none()
            && self.restaurant_id.is_none()
    }
}

/// Listing filters. All optional; dates are inclusive bounds compared as
/// strings against the stored `expire_date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub restaurant_id: Option<i64>,
    pub expire_before: Option<String>,
    pub expire_after: Option<String>,
}

/// One entry of a bulk stock adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkQuantityUpdate {
    pub product_id: i64,
    /// Signed numeric string, e.g. `"-3"` for a fulfillment decrement.
    pub quantity_change: String,
    pub restaurant_id: Option<i64>,
}

/// Per-category aggregation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub count: i64,
    /// Summed quantity, serialized back to string; `"0"` when nothing summed.
    pub total_quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_validation_covers_all_fields() {
        let valid = NewProduct {
            price: "9.99".into(),
            quantity: "10".into(),
            category: "dairy".into(),
            expire_date: Some("2099-01-01".into()),
            restaurant_id: 1,
        };
        assert!(valid.validate().is_ok());

        let bad_price = NewProduct {
            price: "free".into(),
            ..valid.clone()
        };
        assert!(bad_price.validate().is_err());

        let bad_date = NewProduct {
            expire_date: Some("January 1st".into()),
            ..valid
        };
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn expiry_is_strict_and_fails_open() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let mut product = Product {
            id: 1,
            price: "9.99".into(),
            quantity: "10".into(),
            category: "dairy".into(),
            expire_date: Some("2026-06-14".into()),
            restaurant_id: 1,
        };
        assert!(product.is_expired_as_of(today));

        // Exactly today is not yet expired.
        product.expire_date = Some("2026-06-15".into());
        assert!(!product.is_expired_as_of(today));

        product.expire_date = Some("14.06.2026".into());
        assert!(product.is_expired_as_of(today));

        product.expire_date = Some("soon".into());
        assert!(!product.is_expired_as_of(today));

        product.expire_date = None;
        assert!(!product.is_expired_as_of(today));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            quantity: Some("5".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
