//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod business_user_repo;
pub mod category_repo;
pub mod offer_repo;
pub mod order_repo;
pub mod product_repo;


pub use business_user_repo::PostgresBusinessUserRepository;
pub use category_repo::PostgresCategoryRepository;
pub use offer_repo::PostgresOfferRepository;
pub use order_repo::PostgresOrderRepository;
pub use product_repo::PostgresProductRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::validation::FieldErrors;
use crate::error::DomainError;

const MISSING_REFERENCE: &str = "Invalid pk - object does not exist.";

/// Map a failed write, reporting a unique violation as a field error on `field`
pub(crate) fn unique_violation_or_db(e: DbErr, field: &str, message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Validation(FieldErrors::single(field, message))
        }
        _ => write_error(e, field),
    }
}

/// Map a failed write, reporting a dangling foreign key as a field error on `field`
pub(crate) fn write_error(e: DbErr, field: &str) -> DomainError {
    if let DbErr::RecordNotUpdated = e {
        return DomainError::NotFound("Record not found".to_string());
    }
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Validation(FieldErrors::single(field, MISSING_REFERENCE))
        }
        _ => DomainError::Database(e.to_string()),
    }
}
