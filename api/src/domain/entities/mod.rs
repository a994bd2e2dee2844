//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod business_user;
pub mod category;
pub mod offer;
pub mod order;
pub mod product;

pub use business_user::{
    BusinessUser, BusinessUserChanges, BusinessUserId, NewBusinessUser, CASHBACK_RATE,
    CASHBACK_REFERRAL_CODE, DUPLICATE_PHONE,
};
pub use category::{Category, CategoryChanges, CategoryId, NewCategory, DUPLICATE_NAME};
pub use offer::{NewOffer, Offer, OfferChanges, OfferId};
pub use order::{
    CreateOrder, InsufficientStock, LineItemRequest, NewOrderLine, Order, OrderChanges,
    OrderDraft, OrderId, OrderLine, OrderStatus, OrderType,
};
pub use product::{NewProduct, Product, ProductChanges, ProductId};
