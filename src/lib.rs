//! Restaurant inventory core
//!
//! CRUD inventory management for a restaurant ordering platform: product
//! records (price, quantity, category, expiration) scoped per restaurant,
//! with filtered listing, stock adjustment, expiration checks and category
//! aggregation on top of a SQLite store.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the public surface
pub use application::{
    AvailabilityReport, BulkUpdateOutcome, ProductPage, ProductResponse, ProductService,
};
pub use domain::{
    BulkQuantityUpdate, CategoryStats, NewProduct, Product, ProductError, ProductFilter,
    ProductPatch,
};
pub use infrastructure::{DatabaseConnection, InventoryConfig, ProductRepository};
