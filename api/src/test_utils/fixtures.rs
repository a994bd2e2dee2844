//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::entities::{
    BusinessUser, BusinessUserId, Category, CategoryId, NewBusinessUser, NewProduct, Offer,
    OfferId, Order, OrderId, OrderLine, OrderStatus, OrderType, Product, ProductId,
};

/// Phone number of the default test business user
pub const TEST_PHONE: &str = "+15551234567";

/// Create a test business user without a referral code
pub fn test_business_user() -> BusinessUser {
    BusinessUser {
        id: BusinessUserId(1),
        company_name: "ACME Corp".to_string(),
        contact_person: "Jane Doe".to_string(),
        phone: TEST_PHONE.to_string(),
        uploaded_file: None,
        referral_code: None,
        cashback_amount: Decimal::ZERO,
    }
}

/// Create a test business user with a specific referral code
pub fn test_business_user_with_code(code: Option<&str>) -> BusinessUser {
    BusinessUser {
        referral_code: code.map(str::to_string),
        ..test_business_user()
    }
}

/// Registration payload for a business user with the given phone number
pub fn test_new_business_user(phone: &str) -> NewBusinessUser {
    NewBusinessUser {
        company_name: "Globex Ltd".to_string(),
        contact_person: "Hank Scorpio".to_string(),
        phone: phone.to_string(),
        uploaded_file: None,
        referral_code: None,
    }
}

/// Create a test category (always ID 1, the category of `test_product`)
pub fn test_category(name: &str) -> Category {
    Category {
        id: CategoryId(1),
        name: name.to_string(),
        image: None,
    }
}

/// Create a test product with the given unit price and stock level
pub fn test_product(price: Decimal, stock_quantity: i32) -> Product {
    test_product_named(1, "Green tea", price, stock_quantity)
}

/// Create a test product with a specific ID and name
pub fn test_product_named(id: i32, name: &str, price: Decimal, stock_quantity: i32) -> Product {
    Product {
        id: ProductId(id),
        category_id: CategoryId(1),
        category_name: None,
        product_name: name.to_string(),
        product_details: String::new(),
        image: None,
        price,
        wholesale_price: price,
        minimum_order_quantity: 1,
        stock_quantity,
    }
}

/// Creation payload for a product in `category_id`
pub fn test_new_product(category_id: CategoryId, stock_quantity: i32) -> NewProduct {
    NewProduct {
        category_id,
        product_name: "Oolong".to_string(),
        product_details: "Loose leaf, 250g".to_string(),
        image: None,
        price: dec!(12.00),
        wholesale_price: dec!(9.50),
        minimum_order_quantity: 10,
        stock_quantity,
    }
}

pub fn test_offer() -> Offer {
    Offer {
        id: OfferId(1),
        title: "Spring sale".to_string(),
        description: "Ten percent off bulk orders".to_string(),
        discount_percentage: 10.0,
        applicable_minimum_quantity: 50,
        image: None,
    }
}

/// Create a single-line pending order for the default test business user
pub fn test_order(total_price: Decimal, cashback_applied: Decimal) -> Order {
    Order {
        id: OrderId(1),
        business_user_id: BusinessUserId(1),
        order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        total_price,
        billing_address: "1 Main St".to_string(),
        status: OrderStatus::Pending,
        order_type: OrderType::Online,
        cashback_applied,
        lines: vec![OrderLine {
            product: test_product(total_price, 10),
            quantity: 1,
            price: total_price,
        }],
    }
}
