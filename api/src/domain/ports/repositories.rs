//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Lookups return `Ok(None)` for missing rows; deletes report whether a row
//! was removed. `Err` is reserved for storage failures and constraint
//! violations.

use async_trait::async_trait;

use crate::domain::entities::{
    BusinessUser, BusinessUserId, Category, CategoryId, NewBusinessUser, NewCategory, NewOffer,
    NewProduct, Offer, OfferId, Order, OrderDraft, OrderId, Product, ProductId,
};
use crate::error::DomainError;

/// Repository for BusinessUser entities
#[async_trait]
pub trait BusinessUserRepository: Send + Sync {
    /// Find a business user by ID
    async fn find_by_id(&self, id: &BusinessUserId) -> Result<Option<BusinessUser>, DomainError>;

    /// Find a business user by exact phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<BusinessUser>, DomainError>;

    /// List business users ordered by ID
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<BusinessUser>, DomainError>;

    /// Create a business user with a zero cashback balance
    async fn create(&self, user: &NewBusinessUser) -> Result<BusinessUser, DomainError>;

    /// Persist the editable fields of a business user (never the cashback balance)
    async fn update(&self, user: &BusinessUser) -> Result<BusinessUser, DomainError>;

    /// Delete a business user and, by cascade, their orders
    async fn delete(&self, id: &BusinessUserId) -> Result<bool, DomainError>;
}

/// Repository for Category entities
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Category>, DomainError>;

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError>;

    async fn update(&self, category: &Category) -> Result<Category, DomainError>;

    /// Delete a category and, by cascade, its products
    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError>;
}

/// Repository for Product entities
///
/// Every write stores the derived stock status alongside the stock quantity.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID, with its category name resolved
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Product>, DomainError>;

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    async fn update(&self, product: &Product) -> Result<Product, DomainError>;

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError>;
}

/// Repository for Offer entities
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, DomainError>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Offer>, DomainError>;

    async fn create(&self, offer: &NewOffer) -> Result<Offer, DomainError>;

    async fn update(&self, offer: &Offer) -> Result<Offer, DomainError>;

    async fn delete(&self, id: &OfferId) -> Result<bool, DomainError>;
}

/// Repository for Order entities and their line items
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order in one unit of work.
    ///
    /// Within that unit of work the ordering business user is locked, the
    /// referral cashback rule is applied to the draft total and the credited
    /// balance is saved, the order row is written with the cashback it
    /// earned, and one line item is written per draft line, in draft order.
    /// Nothing is persisted if any step fails.
    async fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError>;

    /// Find an order by ID, with line items and their products
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Order>, DomainError>;

    /// Orders whose business user's company name contains `fragment`,
    /// ignoring case
    async fn find_by_company_name(&self, fragment: &str) -> Result<Vec<Order>, DomainError>;

    /// Persist status and billing address; totals and cashback are immutable.
    /// `None` when the order no longer exists.
    async fn update(&self, order: &Order) -> Result<Option<Order>, DomainError>;

    /// Delete an order and its line items
    async fn delete(&self, id: &OrderId) -> Result<bool, DomainError>;
}
