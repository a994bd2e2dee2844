//! SeaORM table models
//!
//! Row-level representations of the PostgreSQL schema. Adapters convert
//! these into domain entities; nothing outside `adapters::postgres` uses them.

pub mod business_users;
pub mod categories;
pub mod offers;
pub mod order_products;
pub mod orders;
pub mod products;
