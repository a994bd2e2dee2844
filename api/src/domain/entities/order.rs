//! Order domain entity
//!
//! Orders are created together with their line items through the order
//! workflow and are only ever partially updated afterwards (status and
//! billing address). The cashback recorded on an order is fixed at creation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::business_user::BusinessUserId;
use super::product::{Product, ProductId};
use crate::domain::validation::FieldErrors;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i32);

impl From<i32> for OrderId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Processing" => Ok(OrderStatus::Processing),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("\"{}\" is not a valid choice.", s)),
        }
    }
}

/// Sales channel of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Online,
    Offline,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Online => write!(f, "Online"),
            OrderType::Offline => write!(f, "Offline"),
        }
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Online" => Ok(OrderType::Online),
            "Offline" => Ok(OrderType::Offline),
            _ => Err(format!("\"{}\" is not a valid choice.", s)),
        }
    }
}

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: i32,
    /// Line total: unit price times quantity at creation time
    pub price: Decimal,
}

/// A placed order with its line items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub business_user_id: BusinessUserId,
    pub order_date: NaiveDate,
    pub total_price: Decimal,
    pub billing_address: String,
    pub status: OrderStatus,
    pub order_type: OrderType,
    /// Cashback credited when the order was created
    pub cashback_applied: Decimal,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Sum of the line prices
    pub fn lines_total(&self) -> Decimal {
        self.lines.iter().map(|line| line.price).sum()
    }
}

/// A requested product and quantity, in the order the caller listed them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Input to the order creation workflow
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub business_user_phone: String,
    pub items: Vec<LineItemRequest>,
    pub billing_address: String,
    pub order_type: OrderType,
}

impl CreateOrder {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.billing_address.trim().is_empty() {
            errors.add("billing_address", "This field may not be blank.");
        }
        for item in &self.items {
            if item.quantity <= 0 {
                errors.add(
                    "product_ids_and_quantities",
                    format!(
                        "Quantity for product {} must be greater than zero.",
                        item.product_id
                    ),
                );
            }
        }
        errors
    }
}

/// A fully validated line waiting to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub product: Product,
    pub quantity: i32,
    pub price: Decimal,
}

/// Error raised when a line cannot be added to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientStock {
    pub product_name: String,
}

/// An order assembled from validated lines, not yet persisted.
///
/// The total is always the sum of the line prices.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub business_user_id: BusinessUserId,
    pub billing_address: String,
    pub order_type: OrderType,
    lines: Vec<NewOrderLine>,
    total_price: Decimal,
}

impl OrderDraft {
    pub fn new(
        business_user_id: BusinessUserId,
        billing_address: impl Into<String>,
        order_type: OrderType,
    ) -> Self {
        Self {
            business_user_id,
            billing_address: billing_address.into(),
            order_type,
            lines: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Check stock for `quantity` units of `product` and add the line
    pub fn add_line(&mut self, product: Product, quantity: i32) -> Result<(), InsufficientStock> {
        if !product.has_stock_for(quantity) {
            return Err(InsufficientStock {
                product_name: product.product_name,
            });
        }

        let price = product.line_price(quantity);
        self.total_price += price;
        self.lines.push(NewOrderLine {
            product,
            quantity,
            price,
        });
        Ok(())
    }

    pub fn lines(&self) -> &[NewOrderLine] {
        &self.lines
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Status every new order starts in
    pub fn status(&self) -> OrderStatus {
        OrderStatus::default()
    }
}

/// Partial update of an existing order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub billing_address: Option<String>,
}

impl OrderChanges {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if matches!(&self.billing_address, Some(address) if address.trim().is_empty()) {
            errors.add("billing_address", "This field may not be blank.");
        }
        errors
    }

    pub fn apply_to(&self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(address) = &self.billing_address {
            order.billing_address = address.clone();
        }
    }
}
