//! Input validation for product fields
//!
//! Price and quantity travel as numeric strings and expiration dates as one
//! of two accepted formats. These helpers are the single place where those
//! strings are parsed; both the service layer (on create) and the repository
//! (on update paths) go through them before anything reaches the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::errors::ProductError;

/// Canonical storage format. Listing-by-expiration only behaves for rows
/// stored in this format (see `ProductRepository::get_expiring`).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Tolerated alternative input format, stored as given.
pub const DATE_FORMAT_DOTTED: &str = "%d.%m.%Y";

/// Parses a numeric string field (price, quantity, stock delta) into a
/// decimal, failing with `InvalidData` when the value is not a number.
pub fn parse_numeric_string(field: &str, value: &str) -> Result<Decimal, ProductError> {
    Decimal::from_str(value.trim())
        .map_err(|_| ProductError::invalid_data(format!("Invalid {field} format: {value}")))
}

/// Validates an optional expiration date. Absent is valid; a present value
/// must parse under `YYYY-MM-DD` or `DD.MM.YYYY`.
pub fn validate_date_format(value: Option<&str>) -> Result<(), ProductError> {
    match value {
        None => Ok(()),
        Some(v) => parse_expire_date(v).map(|_| ()).ok_or_else(|| {
            ProductError::invalid_data(format!(
                "Date must be in format YYYY-MM-DD or DD.MM.YYYY: {v}"
            ))
        }),
    }
}

/// Format-tolerant date parse: ISO first, dotted fallback.
pub fn parse_expire_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(value, DATE_FORMAT_DOTTED))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_parse_to_decimals() {
        assert_eq!(
            parse_numeric_string("price", "9.99").unwrap(),
            Decimal::from_str("9.99").unwrap()
        );
        assert_eq!(
            parse_numeric_string("quantity", "-3").unwrap(),
            Decimal::from_str("-3").unwrap()
        );
        assert!(parse_numeric_string("price", "abc").is_err());
        assert!(parse_numeric_string("quantity", "").is_err());
    }

    #[test]
    fn invalid_numeric_error_names_the_field() {
        let err = parse_numeric_string("price", "cheap").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid product data: Invalid price format: cheap"
        );
    }

    #[test]
    fn both_date_formats_are_accepted() {
        assert!(validate_date_format(Some("2026-12-31")).is_ok());
        assert!(validate_date_format(Some("31.12.2026")).is_ok());
        assert!(validate_date_format(None).is_ok());
        assert!(validate_date_format(Some("12/31/2026")).is_err());
        assert!(validate_date_format(Some("not-a-date")).is_err());
    }

    #[test]
    fn tolerant_parse_handles_both_formats() {
        let iso = parse_expire_date("2026-01-05").unwrap();
        let dotted = parse_expire_date("05.01.2026").unwrap();
        assert_eq!(iso, dotted);
        assert!(parse_expire_date("2026-13-01").is_none());
    }
}
