//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod business_users;
pub mod catalog;
pub mod orders;

pub use business_users::{
    create_business_user, delete_business_user, delete_business_user_by_phone,
    get_business_user, get_business_user_by_phone, list_business_users, lookup_user_by_phone,
    patch_business_user, put_business_user,
};
pub use catalog::{
    create_category, create_offer, create_product, delete_category, delete_offer, delete_product,
    get_category, get_offer, get_product, list_categories, list_offers, list_products,
    patch_category, patch_offer, patch_product, put_category, put_offer, put_product,
};
pub use orders::{
    create_order, delete_order, get_order, list_orders, orders_by_customer, patch_order,
};

use rust_decimal::Decimal;
use serde::Deserialize;

/// Page size used when a list request gives no `limit`
const DEFAULT_PAGE_SIZE: u64 = 100;

/// Largest page a list request may ask for
const MAX_PAGE_SIZE: u64 = 500;

/// Detail message for a missing entity on the generic CRUD routes
pub(crate) const NOT_FOUND: &str = "Not found.";

/// Query parameters for list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl ListQuery {
    /// Requested page size, capped
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_PAGE_SIZE)
    }
}

/// Money values are rendered with exactly two decimal places
pub(crate) fn money(mut value: Decimal) -> Decimal {
    value.rescale(2);
    value
}
