//! Domain module - entities, validation and the error taxonomy
//!
//! Everything here is persistence-agnostic; the repository and service
//! layers build on these types.

pub mod errors;
pub mod product;
pub mod validation;

pub use errors::ProductError;
pub use product::{
    BulkQuantityUpdate, CategoryStats, NewProduct, Product, ProductFilter, ProductPatch,
};
