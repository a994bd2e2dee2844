//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod business_user_service;
pub mod catalog_service;
pub mod order_service;

pub use business_user_service::BusinessUserService;
pub use catalog_service::CatalogService;
pub use order_service::OrderService;
