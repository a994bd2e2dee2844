//! Mock implementations of port traits
//!
//! In-memory repositories share one `InMemoryDb`, the way the PostgreSQL
//! adapters share a connection, so cascades and the order/cashback unit of
//! work behave as they do against the real schema.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    BusinessUser, BusinessUserId, Category, CategoryId, NewBusinessUser, NewCategory, NewOffer,
    NewProduct, Offer, OfferId, Order, OrderDraft, OrderId, OrderLine, Product, ProductId,
    DUPLICATE_NAME, DUPLICATE_PHONE,
};
use crate::domain::ports::{
    BusinessUserRepository, CategoryRepository, OfferRepository, OrderRepository,
    ProductRepository,
};
use crate::domain::validation::FieldErrors;
use crate::error::DomainError;

// ============================================================================
// Shared in-memory tables
// ============================================================================

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, BusinessUser>,
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    offers: BTreeMap<i32, Offer>,
    orders: BTreeMap<i32, Order>,
}

impl Tables {
    /// Re-resolve a product's category name, as a join would
    fn with_category_name(&self, mut product: Product) -> Product {
        product.category_name = self
            .categories
            .get(&product.category_id.0)
            .map(|c| c.name.clone());
        product
    }

    /// Re-resolve line item products against the current product rows
    fn hydrate(&self, mut order: Order) -> Order {
        for line in &mut order.lines {
            if let Some(product) = self.products.get(&line.product.id.0) {
                line.product = self.with_category_name(product.clone());
            }
        }
        order
    }

    fn delete_user(&mut self, id: i32) -> bool {
        let removed = self.users.remove(&id).is_some();
        if removed {
            self.orders.retain(|_, o| o.business_user_id.0 != id);
        }
        removed
    }

    fn delete_product(&mut self, id: i32) -> bool {
        let removed = self.products.remove(&id).is_some();
        if removed {
            for order in self.orders.values_mut() {
                order.lines.retain(|l| l.product.id.0 != id);
            }
        }
        removed
    }

    fn delete_category(&mut self, id: i32) -> bool {
        let removed = self.categories.remove(&id).is_some();
        if removed {
            let product_ids: Vec<i32> = self
                .products
                .values()
                .filter(|p| p.category_id.0 == id)
                .map(|p| p.id.0)
                .collect();
            for product_id in product_ids {
                self.delete_product(product_id);
            }
        }
        removed
    }
}

fn next_id<T>(table: &BTreeMap<i32, T>) -> i32 {
    table.keys().next_back().map_or(1, |id| id + 1)
}

fn page<T: Clone>(table: &BTreeMap<i32, T>, limit: u64, offset: u64) -> Vec<T> {
    table
        .values()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

/// Handle to the shared in-memory tables
#[derive(Clone, Default)]
pub struct InMemoryDb {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a business user
    pub fn with_user(self, user: BusinessUser) -> Self {
        self.tables.write().unwrap().users.insert(user.id.0, user);
        self
    }

    pub fn with_category(self, category: Category) -> Self {
        self.tables
            .write()
            .unwrap()
            .categories
            .insert(category.id.0, category);
        self
    }

    pub fn with_product(self, product: Product) -> Self {
        self.tables
            .write()
            .unwrap()
            .products
            .insert(product.id.0, product);
        self
    }

    pub fn with_offer(self, offer: Offer) -> Self {
        self.tables.write().unwrap().offers.insert(offer.id.0, offer);
        self
    }

    /// Current state of a business user row
    pub fn user(&self, id: BusinessUserId) -> Option<BusinessUser> {
        self.tables.read().unwrap().users.get(&id.0).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.tables.read().unwrap().orders.len()
    }
}

// ============================================================================
// In-Memory Business User Repository
// ============================================================================

pub struct InMemoryBusinessUserRepository {
    db: InMemoryDb,
}

impl InMemoryBusinessUserRepository {
    pub fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

fn duplicate_phone(tables: &Tables, phone: &str, except: Option<i32>) -> Result<(), DomainError> {
    let taken = tables
        .users
        .values()
        .any(|u| u.phone == phone && Some(u.id.0) != except);
    if taken {
        return Err(DomainError::Validation(FieldErrors::single(
            "phone",
            DUPLICATE_PHONE,
        )));
    }
    Ok(())
}

#[async_trait]
impl BusinessUserRepository for InMemoryBusinessUserRepository {
    async fn find_by_id(&self, id: &BusinessUserId) -> Result<Option<BusinessUser>, DomainError> {
        Ok(self.db.tables.read().unwrap().users.get(&id.0).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<BusinessUser>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        Ok(tables.users.values().find(|u| u.phone == phone).cloned())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<BusinessUser>, DomainError> {
        Ok(page(&self.db.tables.read().unwrap().users, limit, offset))
    }

    async fn create(&self, new_user: &NewBusinessUser) -> Result<BusinessUser, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        duplicate_phone(&tables, &new_user.phone, None)?;

        let user = BusinessUser {
            id: BusinessUserId(next_id(&tables.users)),
            company_name: new_user.company_name.clone(),
            contact_person: new_user.contact_person.clone(),
            phone: new_user.phone.clone(),
            uploaded_file: new_user.uploaded_file.clone(),
            referral_code: new_user.referral_code.clone(),
            cashback_amount: Decimal::ZERO,
        };
        tables.users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &BusinessUser) -> Result<BusinessUser, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        duplicate_phone(&tables, &user.phone, Some(user.id.0))?;

        let stored = tables
            .users
            .get_mut(&user.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("BusinessUser {}", user.id)))?;
        // Balance column is not part of the update
        let cashback_amount = stored.cashback_amount;
        *stored = BusinessUser {
            cashback_amount,
            ..user.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &BusinessUserId) -> Result<bool, DomainError> {
        Ok(self.db.tables.write().unwrap().delete_user(id.0))
    }
}

// ============================================================================
// In-Memory Category Repository
// ============================================================================

pub struct InMemoryCategoryRepository {
    db: InMemoryDb,
}

impl InMemoryCategoryRepository {
    pub fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

fn duplicate_name(tables: &Tables, name: &str, except: Option<i32>) -> Result<(), DomainError> {
    let taken = tables
        .categories
        .values()
        .any(|c| c.name == name && Some(c.id.0) != except);
    if taken {
        return Err(DomainError::Validation(FieldErrors::single(
            "name",
            DUPLICATE_NAME,
        )));
    }
    Ok(())
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.db.tables.read().unwrap().categories.get(&id.0).cloned())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Category>, DomainError> {
        Ok(page(&self.db.tables.read().unwrap().categories, limit, offset))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        duplicate_name(&tables, &category.name, None)?;

        let category = Category {
            id: CategoryId(next_id(&tables.categories)),
            name: category.name.clone(),
            image: category.image.clone(),
        };
        tables.categories.insert(category.id.0, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<Category, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        duplicate_name(&tables, &category.name, Some(category.id.0))?;

        let stored = tables
            .categories
            .get_mut(&category.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("Category {}", category.id)))?;
        *stored = category.clone();
        Ok(category.clone())
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError> {
        Ok(self.db.tables.write().unwrap().delete_category(id.0))
    }
}

// ============================================================================
// In-Memory Product Repository
// ============================================================================

pub struct InMemoryProductRepository {
    db: InMemoryDb,
}

impl InMemoryProductRepository {
    pub fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

fn missing_category(tables: &Tables, id: CategoryId) -> Result<(), DomainError> {
    if !tables.categories.contains_key(&id.0) {
        return Err(DomainError::Validation(FieldErrors::single(
            "category",
            "Invalid pk - object does not exist.",
        )));
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        Ok(tables
            .products
            .get(&id.0)
            .cloned()
            .map(|p| tables.with_category_name(p)))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Product>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        Ok(page(&tables.products, limit, offset)
            .into_iter()
            .map(|p| tables.with_category_name(p))
            .collect())
    }

    async fn create(&self, new_product: &NewProduct) -> Result<Product, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        missing_category(&tables, new_product.category_id)?;

        let product = Product {
            id: ProductId(next_id(&tables.products)),
            category_id: new_product.category_id,
            category_name: None,
            product_name: new_product.product_name.clone(),
            product_details: new_product.product_details.clone(),
            image: new_product.image.clone(),
            price: new_product.price,
            wholesale_price: new_product.wholesale_price,
            minimum_order_quantity: new_product.minimum_order_quantity,
            stock_quantity: new_product.stock_quantity,
        };
        tables.products.insert(product.id.0, product.clone());
        Ok(tables.with_category_name(product))
    }

    async fn update(&self, product: &Product) -> Result<Product, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        missing_category(&tables, product.category_id)?;

        let stored = tables
            .products
            .get_mut(&product.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", product.id)))?;
        *stored = product.clone();
        Ok(tables.with_category_name(product.clone()))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        Ok(self.db.tables.write().unwrap().delete_product(id.0))
    }
}

// ============================================================================
// In-Memory Offer Repository
// ============================================================================

pub struct InMemoryOfferRepository {
    db: InMemoryDb,
}

impl InMemoryOfferRepository {
    pub fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        Ok(self.db.tables.read().unwrap().offers.get(&id.0).cloned())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Offer>, DomainError> {
        Ok(page(&self.db.tables.read().unwrap().offers, limit, offset))
    }

    async fn create(&self, new_offer: &NewOffer) -> Result<Offer, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        let offer = Offer {
            id: OfferId(next_id(&tables.offers)),
            title: new_offer.title.clone(),
            description: new_offer.description.clone(),
            discount_percentage: new_offer.discount_percentage,
            applicable_minimum_quantity: new_offer.applicable_minimum_quantity,
            image: new_offer.image.clone(),
        };
        tables.offers.insert(offer.id.0, offer.clone());
        Ok(offer)
    }

    async fn update(&self, offer: &Offer) -> Result<Offer, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        let stored = tables
            .offers
            .get_mut(&offer.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("Offer {}", offer.id)))?;
        *stored = offer.clone();
        Ok(offer.clone())
    }

    async fn delete(&self, id: &OfferId) -> Result<bool, DomainError> {
        Ok(self.db.tables.write().unwrap().offers.remove(&id.0).is_some())
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

pub struct InMemoryOrderRepository {
    db: InMemoryDb,
}

impl InMemoryOrderRepository {
    pub fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, DomainError> {
        // Holding the write lock for the whole call stands in for the transaction
        let mut tables = self.db.tables.write().unwrap();
        let id = next_id(&tables.orders);

        let mut user = tables
            .users
            .get(&draft.business_user_id.0)
            .cloned()
            .ok_or_else(|| {
                DomainError::NotFound(format!("BusinessUser {}", draft.business_user_id))
            })?;
        let cashback = user.apply_referral_cashback(draft.total_price());
        user.check_cashback_balance().into_result()?;
        tables.users.insert(user.id.0, user);

        let order = Order {
            id: OrderId(id),
            business_user_id: draft.business_user_id,
            order_date: Utc::now().date_naive(),
            total_price: draft.total_price(),
            billing_address: draft.billing_address.clone(),
            status: draft.status(),
            order_type: draft.order_type,
            cashback_applied: cashback,
            lines: draft
                .lines()
                .iter()
                .map(|line| OrderLine {
                    product: line.product.clone(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
        };
        tables.orders.insert(id, order.clone());
        Ok(tables.hydrate(order))
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        Ok(tables.orders.get(&id.0).cloned().map(|o| tables.hydrate(o)))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Order>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        Ok(page(&tables.orders, limit, offset)
            .into_iter()
            .map(|o| tables.hydrate(o))
            .collect())
    }

    async fn find_by_company_name(&self, fragment: &str) -> Result<Vec<Order>, DomainError> {
        let tables = self.db.tables.read().unwrap();
        let fragment = fragment.to_lowercase();

        Ok(tables
            .orders
            .values()
            .filter(|o| {
                tables
                    .users
                    .get(&o.business_user_id.0)
                    .is_some_and(|u| u.company_name.to_lowercase().contains(&fragment))
            })
            .cloned()
            .map(|o| tables.hydrate(o))
            .collect())
    }

    async fn update(&self, order: &Order) -> Result<Option<Order>, DomainError> {
        let mut tables = self.db.tables.write().unwrap();
        let Some(stored) = tables.orders.get_mut(&order.id.0) else {
            return Ok(None);
        };
        stored.status = order.status;
        stored.billing_address = order.billing_address.clone();
        let updated = stored.clone();
        Ok(Some(tables.hydrate(updated)))
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, DomainError> {
        Ok(self.db.tables.write().unwrap().orders.remove(&id.0).is_some())
    }
}

// ============================================================================
// Failing Order Repository
// ============================================================================

/// Order store whose writes always fail, leaving the shared tables untouched
pub struct FailingOrderRepository;

#[async_trait]
impl OrderRepository for FailingOrderRepository {
    async fn create(&self, _draft: &OrderDraft) -> Result<Order, DomainError> {
        Err(DomainError::Database("connection reset by peer".to_string()))
    }

    async fn find_by_id(&self, _id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(None)
    }

    async fn list(&self, _limit: u64, _offset: u64) -> Result<Vec<Order>, DomainError> {
        Ok(Vec::new())
    }

    async fn find_by_company_name(&self, _fragment: &str) -> Result<Vec<Order>, DomainError> {
        Ok(Vec::new())
    }

    async fn update(&self, _order: &Order) -> Result<Option<Order>, DomainError> {
        Err(DomainError::Database("connection reset by peer".to_string()))
    }

    async fn delete(&self, _id: &OrderId) -> Result<bool, DomainError> {
        Err(DomainError::Database("connection reset by peer".to_string()))
    }
}
