//! Response representations for the service layer
//!
//! Persisted rows are translated into these shapes before leaving the crate.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Externally visible product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub price: String,
    pub quantity: String,
    pub category: String,
    pub expire_date: Option<String>,
    pub restaurant_id: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
            expire_date: product.expire_date,
            restaurant_id: product.restaurant_id,
        }
    }
}

/// One page of a filtered listing plus the total ignoring pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductResponse>,
    pub total_count: i64,
    pub skip: i64,
    pub limit: i64,
}

/// Result of an availability probe. Never an error: parse problems on the
/// stored quantity degrade to `available: false` with the remaining fields
/// reported best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub available: bool,
    pub current_quantity: String,
    pub required_quantity: String,
    pub is_expired: bool,
    pub expire_date: Option<String>,
}

/// Per-entry outcome of a bulk stock adjustment. Failures ride along in the
/// same sequence as successes; the batch itself never aborts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkUpdateOutcome {
    Updated { product: ProductResponse },
    Failed { product_id: i64, error: String },
}
