//! Infrastructure module - persistence and runtime concerns
//!
//! The repository here is the only code in the crate that issues queries
//! against the store.

pub mod config;
pub mod database_connection;
pub mod logging;
pub mod product_repository;

pub use config::InventoryConfig;
pub use database_connection::DatabaseConnection;
pub use product_repository::ProductRepository;
