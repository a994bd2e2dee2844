//! PostgreSQL adapter for ProductRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::write_error;
use crate::domain::entities::product::in_stock;
use crate::domain::entities::{CategoryId, NewProduct, Product, ProductId};
use crate::domain::ports::ProductRepository;
use crate::entity::{categories, products};
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_with_category(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|(product, category)| to_product(product, category)))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        self.find_with_category(id.0).await
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .find_also_related(categories::Entity)
            .order_by_asc(products::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results
            .into_iter()
            .map(|(product, category)| to_product(product, category))
            .collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let model = products::ActiveModel {
            category_id: Set(product.category_id.0),
            product_name: Set(product.product_name.clone()),
            product_details: Set(product.product_details.clone()),
            image: Set(product.image.clone()),
            price: Set(product.price),
            wholesale_price: Set(product.wholesale_price),
            minimum_order_quantity: Set(product.minimum_order_quantity),
            stock_quantity: Set(product.stock_quantity),
            is_in_stock: Set(in_stock(product.stock_quantity)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "category"))?;

        self.find_with_category(result.id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product {} not found", result.id)))
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        products::ActiveModel {
            id: Set(product.id.0),
            category_id: Set(product.category_id.0),
            product_name: Set(product.product_name.clone()),
            product_details: Set(product.product_details.clone()),
            image: Set(product.image.clone()),
            price: Set(product.price),
            wholesale_price: Set(product.wholesale_price),
            minimum_order_quantity: Set(product.minimum_order_quantity),
            stock_quantity: Set(product.stock_quantity),
            is_in_stock: Set(product.is_in_stock()),
        }
        .update(&self.db)
        .await
        .map_err(|e| write_error(e, "category"))?;

        self.find_with_category(product.id.0)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product {} not found", product.id)))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Load products (with category names) keyed by ID
///
/// Shared with the order adapter, which resolves line item products inside
/// its own connection or transaction.
pub(crate) async fn load_products<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, Product>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = products::Entity::find()
        .filter(products::Column::Id.is_in(ids))
        .find_also_related(categories::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(product, category)| (product.id, to_product(product, category)))
        .collect())
}

/// Convert SeaORM models to domain entity
pub(crate) fn to_product(model: products::Model, category: Option<categories::Model>) -> Product {
    Product {
        id: ProductId(model.id),
        category_id: CategoryId(model.category_id),
        category_name: category.map(|c| c.name),
        product_name: model.product_name,
        product_details: model.product_details,
        image: model.image,
        price: model.price,
        wholesale_price: model.wholesale_price,
        minimum_order_quantity: model.minimum_order_quantity,
        stock_quantity: model.stock_quantity,
    }
}
