//! Business user handlers
//!
//! CRUD on `/business_users/` plus the phone-number lookup endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{money, ListQuery, NOT_FOUND};
use crate::domain::entities::{BusinessUser, BusinessUserChanges, BusinessUserId, NewBusinessUser};
use crate::error::AppError;
use crate::AppState;

/// Full business user representation
#[derive(Debug, Serialize)]
pub struct BusinessUserResponse {
    pub id: i32,
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    pub uploaded_file: Option<String>,
    pub referral_code: Option<String>,
    pub cashback_amount: Decimal,
}

impl From<BusinessUser> for BusinessUserResponse {
    fn from(user: BusinessUser) -> Self {
        Self {
            id: user.id.0,
            company_name: user.company_name,
            contact_person: user.contact_person,
            phone: user.phone,
            uploaded_file: user.uploaded_file,
            referral_code: user.referral_code,
            cashback_amount: money(user.cashback_amount),
        }
    }
}

/// Request body for `POST /get_user_by_phone/`
#[derive(Debug, Deserialize)]
pub struct PhoneLookupRequest {
    pub phone: String,
}

/// Summary returned by the phone lookup
#[derive(Debug, Serialize)]
pub struct PhoneLookupResponse {
    pub company_name: String,
    pub contact_person: String,
    pub phone: String,
    pub referral_code: Option<String>,
    pub cashback_amount: Decimal,
}

impl From<BusinessUser> for PhoneLookupResponse {
    fn from(user: BusinessUser) -> Self {
        Self {
            company_name: user.company_name,
            contact_person: user.contact_person,
            phone: user.phone,
            referral_code: user.referral_code,
            cashback_amount: money(user.cashback_amount),
        }
    }
}

/// GET /business_users/
pub async fn list_business_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BusinessUserResponse>>, AppError> {
    let users = state
        .business_user_service
        .list(query.limit(), query.offset)
        .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /business_users/
pub async fn create_business_user(
    State(state): State<AppState>,
    body: Result<Json<NewBusinessUser>, JsonRejection>,
) -> Result<(StatusCode, Json<BusinessUserResponse>), AppError> {
    let Json(new_user) = body?;
    let user = state.business_user_service.create(new_user).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /business_users/:id/
pub async fn get_business_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BusinessUserResponse>, AppError> {
    let user = state
        .business_user_service
        .get(&BusinessUserId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(user.into()))
}

/// PUT /business_users/:id/
pub async fn put_business_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<NewBusinessUser>, JsonRejection>,
) -> Result<Json<BusinessUserResponse>, AppError> {
    let Json(replacement) = body?;
    update_business_user(state, id, replacement.into()).await
}

/// PATCH /business_users/:id/
pub async fn patch_business_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<BusinessUserChanges>, JsonRejection>,
) -> Result<Json<BusinessUserResponse>, AppError> {
    let Json(changes) = body?;
    update_business_user(state, id, changes).await
}

async fn update_business_user(
    state: AppState,
    id: i32,
    changes: BusinessUserChanges,
) -> Result<Json<BusinessUserResponse>, AppError> {
    let user = state
        .business_user_service
        .update(&BusinessUserId(id), changes)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(user.into()))
}

/// DELETE /business_users/:id/
pub async fn delete_business_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if state
        .business_user_service
        .delete(&BusinessUserId(id))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(NOT_FOUND.to_string()))
    }
}

/// GET /business_user/:phone/
pub async fn get_business_user_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<BusinessUserResponse>, AppError> {
    let user = state
        .business_user_service
        .get_by_phone(&phone)
        .await?
        .ok_or_else(|| AppError::NotFound("BusinessUser not found.".to_string()))?;

    Ok(Json(user.into()))
}

/// DELETE /business_user/:phone/
///
/// Removes the business user and, by cascade, their orders.
pub async fn delete_business_user_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.business_user_service.delete_by_phone(&phone).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("BusinessUser not found.".to_string()))
    }
}

/// POST /get_user_by_phone/
///
/// Validated phone lookup returning a summary of the account.
pub async fn lookup_user_by_phone(
    State(state): State<AppState>,
    body: Result<Json<PhoneLookupRequest>, JsonRejection>,
) -> Result<Json<PhoneLookupResponse>, AppError> {
    let Json(request) = body?;
    let user = state
        .business_user_service
        .lookup_by_phone(&request.phone)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(Json(user.into()))
}
