//! Order service
//!
//! Runs the order creation workflow and the order management use cases.
//!
//! Order creation resolves the business user and every requested product
//! before anything is written. The draft then goes to the order repository,
//! which persists the order, its lines and the referral cashback credit as
//! one unit of work.

use std::sync::Arc;

use crate::domain::entities::{CreateOrder, Order, OrderChanges, OrderDraft, OrderId};
use crate::domain::ports::{BusinessUserRepository, OrderRepository, ProductRepository};
use crate::domain::validation::FieldErrors;
use crate::error::{DomainError, OrderError};

/// Service for placing and managing orders
pub struct OrderService<U, P, O>
where
    U: BusinessUserRepository + ?Sized,
    P: ProductRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    users: Arc<U>,
    products: Arc<P>,
    orders: Arc<O>,
}

impl<U, P, O> OrderService<U, P, O>
where
    U: BusinessUserRepository + ?Sized,
    P: ProductRepository + ?Sized,
    O: OrderRepository + ?Sized,
{
    pub fn new(users: Arc<U>, products: Arc<P>, orders: Arc<O>) -> Self {
        Self {
            users,
            products,
            orders,
        }
    }

    /// Place an order for the business user registered under the request's phone.
    ///
    /// Lines are checked in request order; the first missing product or
    /// short stock aborts the whole order before anything is persisted.
    pub async fn create_order(&self, request: CreateOrder) -> Result<Order, OrderError> {
        let errors = request.validate();
        if !errors.is_empty() {
            return Err(OrderError::Invalid(errors));
        }

        let user = self
            .users
            .find_by_phone(&request.business_user_phone)
            .await?
            .ok_or(OrderError::BusinessUserNotFound)?;

        let mut draft = OrderDraft::new(user.id, request.billing_address, request.order_type);
        for item in &request.items {
            let product = self
                .products
                .find_by_id(&item.product_id)
                .await?
                .ok_or(OrderError::ProductNotFound(item.product_id))?;

            draft
                .add_line(product, item.quantity)
                .map_err(|e| OrderError::InsufficientStock(e.product_name))?;
        }

        // Line prices never exceed the total, so one check covers every money column
        let mut errors = FieldErrors::new();
        errors.money("total_price", draft.total_price());
        if !errors.is_empty() {
            return Err(OrderError::Invalid(errors));
        }

        let order = self.orders.create(&draft).await.map_err(|e| match e {
            // The user row vanished between lookup and insert
            DomainError::NotFound(_) => OrderError::BusinessUserNotFound,
            // The credited balance no longer fits its column
            DomainError::Validation(fields) => OrderError::Invalid(fields),
            other => OrderError::Storage(other),
        })?;

        tracing::info!(
            order_id = %order.id,
            business_user_id = %order.business_user_id,
            total_price = %order.total_price,
            cashback_applied = %order.cashback_applied,
            lines = order.lines.len(),
            "Order created"
        );

        Ok(order)
    }

    pub async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Order>, DomainError> {
        self.orders.list(limit, offset).await
    }

    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        self.orders.find_by_id(id).await
    }

    /// Orders placed by business users whose company name contains `fragment`
    pub async fn orders_by_company_name(&self, fragment: &str) -> Result<Vec<Order>, DomainError> {
        self.orders.find_by_company_name(fragment).await
    }

    /// Change status or billing address; totals and cashback never change
    pub async fn update(
        &self,
        id: &OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, DomainError> {
        changes.validate().into_result()?;

        let Some(mut order) = self.orders.find_by_id(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut order);

        let updated = self.orders.update(&order).await?;
        if let Some(order) = &updated {
            tracing::debug!(order_id = %order.id, status = %order.status, "Order updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &OrderId) -> Result<bool, DomainError> {
        self.orders.delete(id).await
    }
}
