//! Unified error types for the commerce API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence and validation errors raised below the services
//! - `OrderError`: Rejections raised by the order creation workflow
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::ProductId;
use crate::domain::validation::FieldErrors;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),
}

/// Order creation workflow errors
///
/// Every variant except `Storage` is a client error; their messages are
/// returned to the caller verbatim.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("BusinessUser with this phone number does not exist.")]
    BusinessUserNotFound,

    #[error("Product with ID {0} does not exist.")]
    ProductNotFound(ProductId),

    #[error("Not enough stock for product: {0}")]
    InsufficientStock(String),

    #[error("{0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Order(#[from] OrderError),

    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response bodies
///
/// Client errors carry a message under `error`, missing resources a message
/// under `detail`, and field validation failures a map of field to messages.
#[derive(Serialize)]
#[serde(untagged)]
enum ErrorResponse {
    Error { error: String },
    Detail { detail: String },
    Fields(FieldErrors),
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::Error {
            error: "Internal server error".to_string(),
        },
    )
}

fn domain_response(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::Detail {
                detail: msg.clone(),
            },
        ),
        DomainError::Validation(fields) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::Fields(fields.clone()))
        }
        DomainError::Database(msg) => {
            tracing::error!("Database error: {}", msg);
            internal_error()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Domain(e) => domain_response(e),
            AppError::Order(OrderError::Storage(e)) => domain_response(e),
            AppError::Order(e) => {
                tracing::warn!(reason = %e, "Order rejected");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::Error {
                        error: e.to_string(),
                    },
                )
            }
            AppError::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::Error {
                    error: rejection.body_text(),
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::Error { error: msg.clone() },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::Detail {
                    detail: msg.clone(),
                },
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
        };

        (status, Json(body)).into_response()
    }
}
