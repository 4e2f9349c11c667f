//! Typed failures for product operations
//!
//! Every externally visible failure of the repository and service layers is
//! one of these variants, carrying enough context to render a user-facing
//! message without reaching back into the store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("Product with ID {product_id} not found")]
    NotFound { product_id: i64 },

    #[error("No products found for restaurant {restaurant_id}")]
    NoneForRestaurant { restaurant_id: i64 },

    #[error("Invalid product data: {reason}")]
    InvalidData { reason: String },

    #[error(
        "Insufficient quantity for product {product_id}. Requested: {requested}, Available: {available}"
    )]
    InsufficientQuantity {
        product_id: i64,
        requested: String,
        available: String,
    },

    #[error("Product {product_id} expired on {expire_date}")]
    Expired {
        product_id: i64,
        expire_date: String,
    },

    #[error("Product {product_id} does not belong to restaurant {restaurant_id}")]
    RestaurantAccess {
        product_id: i64,
        restaurant_id: i64,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ProductError {
    /// True for the "row exists but is owned by another tenant" case, which
    /// callers often want to treat differently from a plain missing row.
    pub fn is_access_violation(&self) -> bool {
        matches!(self, Self::RestaurantAccess { .. })
    }

    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_identifying_context() {
        let err = ProductError::NotFound { product_id: 7 };
        assert_eq!(err.to_string(), "Product with ID 7 not found");

        let err = ProductError::InsufficientQuantity {
            product_id: 7,
            requested: "-100".into(),
            available: "10".into(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient quantity for product 7. Requested: -100, Available: 10"
        );

        let err = ProductError::RestaurantAccess {
            product_id: 7,
            restaurant_id: 2,
        };
        assert!(err.is_access_violation());
        assert_eq!(
            err.to_string(),
            "Product 7 does not belong to restaurant 2"
        );
    }

    #[test]
    fn only_ownership_mismatch_counts_as_access_violation() {
        assert!(!ProductError::NotFound { product_id: 1 }.is_access_violation());
        assert!(!ProductError::invalid_data("bad").is_access_violation());
    }
}
