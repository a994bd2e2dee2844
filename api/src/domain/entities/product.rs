//! Product domain entity
//!
//! Products belong to a category and carry pricing and stock levels.
//! Stock status is derived from the stock quantity and never stored on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::business_user::double_option;
use super::category::CategoryId;
use crate::domain::validation::FieldErrors;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i32);

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

/// A product available for ordering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    /// Name of the owning category, resolved on read
    pub category_name: Option<String>,
    pub product_name: String,
    pub product_details: String,
    pub image: Option<String>,
    /// Unit price
    pub price: Decimal,
    pub wholesale_price: Decimal,
    pub minimum_order_quantity: i32,
    pub stock_quantity: i32,
}

/// Stock status for a stock level: in stock iff at least one unit is available
pub fn in_stock(stock_quantity: i32) -> bool {
    stock_quantity > 0
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        in_stock(self.stock_quantity)
    }

    /// Whether `quantity` units can be ordered right now
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }

    /// Charged amount for `quantity` units
    pub fn line_price(&self, quantity: i32) -> Decimal {
        self.price * Decimal::from(quantity)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "category")]
    pub category_id: CategoryId,
    pub product_name: String,
    #[serde(default)]
    pub product_details: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Decimal,
    pub wholesale_price: Decimal,
    pub minimum_order_quantity: i32,
    #[serde(default)]
    pub stock_quantity: i32,
}

impl NewProduct {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("product_name", &self.product_name, 255);
        errors.money("price", self.price);
        errors.money("wholesale_price", self.wholesale_price);
        errors.non_negative_int("stock_quantity", self.stock_quantity);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductChanges {
    #[serde(rename = "category")]
    pub category_id: Option<CategoryId>,
    pub product_name: Option<String>,
    pub product_details: Option<String>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub wholesale_price: Option<Decimal>,
    pub minimum_order_quantity: Option<i32>,
    pub stock_quantity: Option<i32>,
}

impl ProductChanges {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.product_name {
            errors.require_text("product_name", name, 255);
        }
        if let Some(price) = self.price {
            errors.money("price", price);
        }
        if let Some(price) = self.wholesale_price {
            errors.money("wholesale_price", price);
        }
        if let Some(stock) = self.stock_quantity {
            errors.non_negative_int("stock_quantity", stock);
        }
        errors
    }

    pub fn apply_to(&self, product: &mut Product) {
        if let Some(category_id) = self.category_id {
            if category_id != product.category_id {
                product.category_id = category_id;
                product.category_name = None;
            }
        }
        if let Some(name) = &self.product_name {
            product.product_name = name.clone();
        }
        if let Some(details) = &self.product_details {
            product.product_details = details.clone();
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(price) = self.wholesale_price {
            product.wholesale_price = price;
        }
        if let Some(quantity) = self.minimum_order_quantity {
            product.minimum_order_quantity = quantity;
        }
        if let Some(stock) = self.stock_quantity {
            product.stock_quantity = stock;
        }
    }
}

impl From<NewProduct> for ProductChanges {
    fn from(product: NewProduct) -> Self {
        Self {
            category_id: Some(product.category_id),
            product_name: Some(product.product_name),
            product_details: Some(product.product_details),
            image: Some(product.image),
            price: Some(product.price),
            wholesale_price: Some(product.wholesale_price),
            minimum_order_quantity: Some(product.minimum_order_quantity),
            stock_quantity: Some(product.stock_quantity),
        }
    }
}
