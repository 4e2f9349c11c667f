//! Application module - service orchestration and response shaping

pub mod dto;
pub mod product_service;

pub use dto::{AvailabilityReport, BulkUpdateOutcome, ProductPage, ProductResponse};
pub use product_service::ProductService;
