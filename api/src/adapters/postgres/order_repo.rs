//! PostgreSQL adapter for OrderRepository
//!
//! Orders are written in a single transaction together with their line items
//! and the referral cashback credit on the ordering business user.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::JoinType;

use super::product_repo::load_products;
use super::write_error;
use crate::domain::entities::{
    BusinessUser, BusinessUserId, Order, OrderDraft, OrderId, OrderLine, OrderStatus, OrderType,
};
use crate::domain::ports::OrderRepository;
use crate::entity::{business_users, order_products, orders};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // Row lock serializes cashback credits for the same business user
        let user_row = business_users::Entity::find_by_id(draft.business_user_id.0)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "BusinessUser {} not found",
                    draft.business_user_id
                ))
            })?;
        let mut user: BusinessUser = user_row.into();

        let total_price = draft.total_price();
        let cashback = user.apply_referral_cashback(total_price);
        // Dropping the transaction rolls back
        user.check_cashback_balance().into_result()?;
        if cashback > Decimal::ZERO {
            business_users::ActiveModel {
                id: Set(user.id.0),
                cashback_amount: Set(user.cashback_amount),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(db_error)?;
        }

        let order = orders::ActiveModel {
            business_user_id: Set(draft.business_user_id.0),
            order_date: Set(Utc::now().date_naive()),
            total_price: Set(total_price),
            billing_address: Set(draft.billing_address.clone()),
            status: Set(draft.status().to_string()),
            order_type: Set(draft.order_type.to_string()),
            cashback_applied: Set(cashback),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        let mut lines = Vec::with_capacity(draft.lines().len());
        for line in draft.lines() {
            order_products::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(line.product.id.0),
                quantity: Set(line.quantity),
                price: Set(line.price),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| write_error(e, "product_ids_and_quantities"))?;

            lines.push(OrderLine {
                product: line.product.clone(),
                quantity: line.quantity,
                price: line.price,
            });
        }

        txn.commit().await.map_err(db_error)?;

        if cashback > Decimal::ZERO {
            tracing::info!(
                business_user_id = %user.id,
                order_id = order.id,
                %cashback,
                balance = %user.cashback_amount,
                "Referral cashback credited"
            );
        }

        to_order(order, lines)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let result = orders::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        match result {
            Some(model) => Ok(with_lines(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Order>, DomainError> {
        let results = orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        with_lines(&self.db, results).await
    }

    async fn find_by_company_name(&self, fragment: &str) -> Result<Vec<Order>, DomainError> {
        let pattern = format!("%{}%", escape_like(fragment));

        let results = orders::Entity::find()
            .join(JoinType::InnerJoin, orders::Relation::BusinessUsers.def())
            .filter(
                Expr::col((business_users::Entity, business_users::Column::CompanyName))
                    .ilike(pattern),
            )
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        with_lines(&self.db, results).await
    }

    async fn update(&self, order: &Order) -> Result<Option<Order>, DomainError> {
        let result = orders::ActiveModel {
            id: Set(order.id.0),
            status: Set(order.status.to_string()),
            billing_address: Set(order.billing_address.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(_) => self.find_by_id(&order.id).await,
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(db_error(e)),
        }
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, DomainError> {
        let result = orders::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }
}

/// Attach line items (with their products) to order rows, keeping row order
async fn with_lines<C: ConnectionTrait>(
    conn: &C,
    models: Vec<orders::Model>,
) -> Result<Vec<Order>, DomainError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let line_rows = order_products::Entity::find()
        .filter(order_products::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_products::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    let mut product_ids: Vec<i32> = line_rows.iter().map(|l| l.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let products = load_products(conn, product_ids).await.map_err(db_error)?;

    let mut lines_by_order: HashMap<i32, Vec<OrderLine>> = HashMap::new();
    for row in line_rows {
        let product = products.get(&row.product_id).cloned().ok_or_else(|| {
            DomainError::Database(format!(
                "Order {} references missing product {}",
                row.order_id, row.product_id
            ))
        })?;
        lines_by_order.entry(row.order_id).or_default().push(OrderLine {
            product,
            quantity: row.quantity,
            price: row.price,
        });
    }

    models
        .into_iter()
        .map(|model| {
            let lines = lines_by_order.remove(&model.id).unwrap_or_default();
            to_order(model, lines)
        })
        .collect()
}

/// Convert SeaORM model and loaded lines to domain entity
fn to_order(model: orders::Model, lines: Vec<OrderLine>) -> Result<Order, DomainError> {
    let status: OrderStatus = model.status.parse().map_err(|e| {
        DomainError::Database(format!("Order {} has invalid status: {}", model.id, e))
    })?;
    let order_type: OrderType = model.order_type.parse().map_err(|e| {
        DomainError::Database(format!("Order {} has invalid order_type: {}", model.id, e))
    })?;

    Ok(Order {
        id: OrderId(model.id),
        business_user_id: BusinessUserId(model.business_user_id),
        order_date: model.order_date,
        total_price: model.total_price,
        billing_address: model.billing_address,
        status,
        order_type,
        cashback_applied: model.cashback_applied,
        lines,
    })
}

/// Escape LIKE wildcards so the fragment matches literally
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
