//! Order handlers
//!
//! Order placement through `/orders/create_order/`, the company-name search,
//! and management of existing orders.

use std::fmt;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::ProductResponse;
use super::{money, ListQuery, NOT_FOUND};
use crate::domain::entities::{
    CreateOrder, LineItemRequest, Order, OrderChanges, OrderId, OrderLine, OrderType, ProductId,
};
use crate::error::AppError;
use crate::AppState;

/// Request body for `POST /orders/create_order/`
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub business_user_phone: String,
    /// Product ID (as a string key) -> quantity
    pub product_ids_and_quantities: LineItems,
    pub billing_address: String,
    pub order_type: OrderType,
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(request: CreateOrderRequest) -> Self {
        CreateOrder {
            business_user_phone: request.business_user_phone,
            items: request.product_ids_and_quantities.0,
            billing_address: request.billing_address,
            order_type: request.order_type,
        }
    }
}

/// Requested lines in the order the client wrote them.
///
/// A repeated product ID keeps its first position and its last quantity.
#[derive(Debug, Default, PartialEq)]
pub struct LineItems(pub Vec<LineItemRequest>);

impl<'de> Deserialize<'de> for LineItems {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LineItemsVisitor;

        impl<'de> Visitor<'de> for LineItemsVisitor {
            type Value = LineItems;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of product IDs to quantities")
            }

            fn visit_map<A>(self, mut map: A) -> Result<LineItems, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items: Vec<LineItemRequest> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((key, quantity)) = map.next_entry::<String, i32>()? {
                    let product_id: ProductId = key.parse().map_err(|_| {
                        de::Error::invalid_value(Unexpected::Str(&key), &"a product ID")
                    })?;

                    match items.iter_mut().find(|item| item.product_id == product_id) {
                        Some(item) => item.quantity = quantity,
                        None => items.push(LineItemRequest {
                            product_id,
                            quantity,
                        }),
                    }
                }

                Ok(LineItems(items))
            }
        }

        deserializer.deserialize_map(LineItemsVisitor)
    }
}

/// One line of an order, with the product as it is now
#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub product: ProductResponse,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product: line.product.into(),
            quantity: line.quantity,
            price: money(line.price),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i32,
    pub business_user: i32,
    pub order_date: NaiveDate,
    pub total_price: Decimal,
    pub billing_address: String,
    pub status: String,
    pub order_type: String,
    pub cashback_applied: Decimal,
    pub order_products: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.0,
            business_user: order.business_user_id.0,
            order_date: order.order_date,
            total_price: money(order.total_price),
            billing_address: order.billing_address,
            status: order.status.to_string(),
            order_type: order.order_type.to_string(),
            cashback_applied: money(order.cashback_applied),
            order_products: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// POST /orders/create_order/
///
/// Place an order for the business user registered under the given phone.
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let Json(request) = body?;
    let order = state.order_service.create_order(request.into()).await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/by_customer/:company_name/
///
/// Orders of business users whose company name contains the fragment, ignoring case.
pub async fn orders_by_customer(
    State(state): State<AppState>,
    Path(company_name): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state
        .order_service
        .orders_by_company_name(&company_name)
        .await?;

    if orders.is_empty() {
        return Err(AppError::NotFound(
            "No orders found for this company name.".to_string(),
        ));
    }

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /orders/
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state
        .order_service
        .list(query.limit(), query.offset)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /orders/:id/
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .order_service
        .get(&OrderId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(order.into()))
}

/// PATCH /orders/:id/
///
/// Only status and billing address can change.
pub async fn patch_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<OrderChanges>, JsonRejection>,
) -> Result<Json<OrderResponse>, AppError> {
    let Json(changes) = body?;
    let order = state
        .order_service
        .update(&OrderId(id), changes)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(order.into()))
}

/// DELETE /orders/:id/
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if state.order_service.delete(&OrderId(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_order;
    use rust_decimal_macros::dec;

    #[test]
    fn line_items_keep_request_order() {
        let json = r#"{
            "business_user_phone": "+15551234567",
            "product_ids_and_quantities": {"9": 1, "2": 4, "5": 2},
            "billing_address": "X",
            "order_type": "Online"
        }"#;

        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();

        let ids: Vec<i32> = request
            .product_ids_and_quantities
            .0
            .iter()
            .map(|item| item.product_id.0)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
        assert_eq!(request.product_ids_and_quantities.0[1].quantity, 4);
    }

    #[test]
    fn repeated_product_keeps_last_quantity() {
        let items: LineItems = serde_json::from_str(r#"{"3": 1, "4": 1, "3": 7}"#).unwrap();

        assert_eq!(
            items.0,
            vec![
                LineItemRequest {
                    product_id: ProductId(3),
                    quantity: 7,
                },
                LineItemRequest {
                    product_id: ProductId(4),
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn non_numeric_product_key_is_rejected() {
        let result: Result<LineItems, _> = serde_json::from_str(r#"{"tea": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_order_type_is_rejected() {
        let json = r#"{
            "business_user_phone": "+15551234567",
            "product_ids_and_quantities": {"1": 1},
            "billing_address": "X",
            "order_type": "Phone"
        }"#;

        assert!(serde_json::from_str::<CreateOrderRequest>(json).is_err());
    }

    #[test]
    fn order_response_shape() {
        let order = test_order(dec!(20), dec!(1));

        let json = serde_json::to_value(OrderResponse::from(order)).unwrap();

        assert_eq!(json["total_price"], "20.00");
        assert_eq!(json["cashback_applied"], "1.00");
        assert_eq!(json["order_date"], "2024-05-01");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["business_user"], 1);
        assert_eq!(json["order_products"][0]["product"]["is_in_stock"], true);
        assert_eq!(json["order_products"][0]["price"], "20.00");
    }
}
