//! Catalog handlers
//!
//! CRUD endpoints for categories, products and offers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{money, ListQuery, NOT_FOUND};
use crate::domain::entities::{
    Category, CategoryChanges, CategoryId, NewCategory, NewOffer, NewProduct, Offer, OfferChanges,
    OfferId, Product, ProductChanges, ProductId,
};
use crate::error::AppError;
use crate::AppState;

fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND.to_string())
}

fn deleted(removed: bool) -> Result<StatusCode, AppError> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.0,
            name: category.name,
            image: category.image,
        }
    }
}

/// GET /categories/
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state
        .catalog_service
        .list_categories(query.limit(), query.offset)
        .await?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// POST /categories/
pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let Json(category) = body?;
    let category = state.catalog_service.create_category(category).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /categories/:id/
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .catalog_service
        .get_category(&CategoryId(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(category.into()))
}

/// PUT /categories/:id/
pub async fn put_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let Json(replacement) = body?;
    update_category(state, id, replacement.into()).await
}

/// PATCH /categories/:id/
pub async fn patch_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<CategoryChanges>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let Json(changes) = body?;
    update_category(state, id, changes).await
}

async fn update_category(
    state: AppState,
    id: i32,
    changes: CategoryChanges,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = state
        .catalog_service
        .update_category(&CategoryId(id), changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(category.into()))
}

/// DELETE /categories/:id/
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    deleted(state.catalog_service.delete_category(&CategoryId(id)).await?)
}

// ============================================================================
// Products
// ============================================================================

/// Product representation, also nested in order line items
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub category: i32,
    pub category_name: Option<String>,
    pub product_name: String,
    pub product_details: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub wholesale_price: Decimal,
    pub minimum_order_quantity: i32,
    pub stock_quantity: i32,
    pub is_in_stock: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let is_in_stock = product.is_in_stock();
        Self {
            id: product.id.0,
            category: product.category_id.0,
            category_name: product.category_name,
            product_name: product.product_name,
            product_details: product.product_details,
            image: product.image,
            price: money(product.price),
            wholesale_price: money(product.wholesale_price),
            minimum_order_quantity: product.minimum_order_quantity,
            stock_quantity: product.stock_quantity,
            is_in_stock,
        }
    }
}

/// GET /products/
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .catalog_service
        .list_products(query.limit(), query.offset)
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /products/
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(product) = body?;
    let product = state.catalog_service.create_product(product).await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /products/:id/
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog_service
        .get_product(&ProductId(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(product.into()))
}

/// PUT /products/:id/
pub async fn put_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Json(replacement) = body?;
    update_product(state, id, replacement.into()).await
}

/// PATCH /products/:id/
pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<ProductChanges>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Json(changes) = body?;
    update_product(state, id, changes).await
}

async fn update_product(
    state: AppState,
    id: i32,
    changes: ProductChanges,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog_service
        .update_product(&ProductId(id), changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(product.into()))
}

/// DELETE /products/:id/
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    deleted(state.catalog_service.delete_product(&ProductId(id)).await?)
}

// ============================================================================
// Offers
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub discount_percentage: f64,
    pub applicable_minimum_quantity: i32,
    pub image: Option<String>,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.0,
            title: offer.title,
            description: offer.description,
            discount_percentage: offer.discount_percentage,
            applicable_minimum_quantity: offer.applicable_minimum_quantity,
            image: offer.image,
        }
    }
}

/// GET /offers/
pub async fn list_offers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OfferResponse>>, AppError> {
    let offers = state
        .catalog_service
        .list_offers(query.limit(), query.offset)
        .await?;

    Ok(Json(offers.into_iter().map(Into::into).collect()))
}

/// POST /offers/
pub async fn create_offer(
    State(state): State<AppState>,
    body: Result<Json<NewOffer>, JsonRejection>,
) -> Result<(StatusCode, Json<OfferResponse>), AppError> {
    let Json(offer) = body?;
    let offer = state.catalog_service.create_offer(offer).await?;

    Ok((StatusCode::CREATED, Json(offer.into())))
}

/// GET /offers/:id/
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OfferResponse>, AppError> {
    let offer = state
        .catalog_service
        .get_offer(&OfferId(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(offer.into()))
}

/// PUT /offers/:id/
pub async fn put_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<NewOffer>, JsonRejection>,
) -> Result<Json<OfferResponse>, AppError> {
    let Json(replacement) = body?;
    update_offer(state, id, replacement.into()).await
}

/// PATCH /offers/:id/
pub async fn patch_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<OfferChanges>, JsonRejection>,
) -> Result<Json<OfferResponse>, AppError> {
    let Json(changes) = body?;
    update_offer(state, id, changes).await
}

async fn update_offer(
    state: AppState,
    id: i32,
    changes: OfferChanges,
) -> Result<Json<OfferResponse>, AppError> {
    let offer = state
        .catalog_service
        .update_offer(&OfferId(id), changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(offer.into()))
}

/// DELETE /offers/:id/
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    deleted(state.catalog_service.delete_offer(&OfferId(id)).await?)
}
