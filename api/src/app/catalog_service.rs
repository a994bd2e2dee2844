//! Catalog service
//!
//! Categories, the products filed under them, and promotional offers.

use std::sync::Arc;

use crate::domain::entities::{
    Category, CategoryChanges, CategoryId, NewCategory, NewOffer, NewProduct, Offer, OfferChanges,
    OfferId, Product, ProductChanges, ProductId,
};
use crate::domain::ports::{CategoryRepository, OfferRepository, ProductRepository};
use crate::domain::validation::FieldErrors;
use crate::error::DomainError;

/// Service for the product catalog
pub struct CatalogService<C, P, O>
where
    C: CategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
    O: OfferRepository + ?Sized,
{
    categories: Arc<C>,
    products: Arc<P>,
    offers: Arc<O>,
}

impl<C, P, O> CatalogService<C, P, O>
where
    C: CategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
    O: OfferRepository + ?Sized,
{
    pub fn new(categories: Arc<C>, products: Arc<P>, offers: Arc<O>) -> Self {
        Self {
            categories,
            products,
            offers,
        }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Category>, DomainError> {
        self.categories.list(limit, offset).await
    }

    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        self.categories.find_by_id(id).await
    }

    pub async fn create_category(&self, category: NewCategory) -> Result<Category, DomainError> {
        category.validate().into_result()?;
        self.categories.create(&category).await
    }

    pub async fn update_category(
        &self,
        id: &CategoryId,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, DomainError> {
        changes.validate().into_result()?;

        let Some(mut category) = self.categories.find_by_id(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut category);

        self.categories.update(&category).await.map(Some)
    }

    /// Delete a category together with its products
    pub async fn delete_category(&self, id: &CategoryId) -> Result<bool, DomainError> {
        self.categories.delete(id).await
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self, limit: u64, offset: u64) -> Result<Vec<Product>, DomainError> {
        self.products.list(limit, offset).await
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        self.products.find_by_id(id).await
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        product.validate().into_result()?;
        self.require_category(&product.category_id).await?;

        let created = self.products.create(&product).await?;
        tracing::debug!(
            product_id = %created.id,
            stock = created.stock_quantity,
            in_stock = created.is_in_stock(),
            "Product created"
        );
        Ok(created)
    }

    pub async fn update_product(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, DomainError> {
        changes.validate().into_result()?;

        let Some(mut product) = self.products.find_by_id(id).await? else {
            return Ok(None);
        };
        if let Some(category_id) = &changes.category_id {
            self.require_category(category_id).await?;
        }
        changes.apply_to(&mut product);

        self.products.update(&product).await.map(Some)
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, DomainError> {
        self.products.delete(id).await
    }

    // ------------------------------------------------------------------
    // Offers
    // ------------------------------------------------------------------

    pub async fn list_offers(&self, limit: u64, offset: u64) -> Result<Vec<Offer>, DomainError> {
        self.offers.list(limit, offset).await
    }

    pub async fn get_offer(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        self.offers.find_by_id(id).await
    }

    pub async fn create_offer(&self, offer: NewOffer) -> Result<Offer, DomainError> {
        offer.validate().into_result()?;
        self.offers.create(&offer).await
    }

    pub async fn update_offer(
        &self,
        id: &OfferId,
        changes: OfferChanges,
    ) -> Result<Option<Offer>, DomainError> {
        changes.validate().into_result()?;

        let Some(mut offer) = self.offers.find_by_id(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut offer);

        self.offers.update(&offer).await.map(Some)
    }

    pub async fn delete_offer(&self, id: &OfferId) -> Result<bool, DomainError> {
        self.offers.delete(id).await
    }

    async fn require_category(&self, id: &CategoryId) -> Result<(), DomainError> {
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(DomainError::Validation(FieldErrors::single(
                "category",
                format!("Invalid pk \"{}\" - object does not exist.", id),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DUPLICATE_NAME;
    use crate::test_utils::{
        test_category, test_new_product, test_offer, test_product, InMemoryCategoryRepository,
        InMemoryDb, InMemoryOfferRepository, InMemoryProductRepository,
    };
    use rust_decimal_macros::dec;

    type TestCatalog =
        CatalogService<InMemoryCategoryRepository, InMemoryProductRepository, InMemoryOfferRepository>;

    fn catalog_with(db: InMemoryDb) -> TestCatalog {
        CatalogService::new(
            Arc::new(InMemoryCategoryRepository::new(db.clone())),
            Arc::new(InMemoryProductRepository::new(db.clone())),
            Arc::new(InMemoryOfferRepository::new(db)),
        )
    }

    #[tokio::test]
    async fn create_product_derives_stock_status() {
        let category = test_category("Tea");
        let catalog = catalog_with(InMemoryDb::new().with_category(category.clone()));

        let stocked = catalog
            .create_product(test_new_product(category.id, 5))
            .await
            .unwrap();
        let empty = catalog
            .create_product(test_new_product(category.id, 0))
            .await
            .unwrap();

        assert!(stocked.is_in_stock());
        assert!(!empty.is_in_stock());
        assert_eq!(stocked.category_name.as_deref(), Some("Tea"));
    }

    #[tokio::test]
    async fn update_product_recomputes_stock_status() {
        let category = test_category("Tea");
        let catalog = catalog_with(InMemoryDb::new().with_category(category.clone()));
        let product = catalog
            .create_product(test_new_product(category.id, 0))
            .await
            .unwrap();

        let changes = ProductChanges {
            stock_quantity: Some(12),
            ..Default::default()
        };
        let updated = catalog
            .update_product(&product.id, changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.stock_quantity, 12);
        assert!(updated.is_in_stock());
    }

    #[tokio::test]
    async fn create_product_requires_existing_category() {
        let catalog = catalog_with(InMemoryDb::new());

        let result = catalog
            .create_product(test_new_product(CategoryId(99), 1))
            .await;

        match result {
            Err(DomainError::Validation(fields)) => {
                assert_eq!(
                    fields.get("category").unwrap(),
                    ["Invalid pk \"99\" - object does not exist."]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_missing_product_returns_none() {
        let catalog = catalog_with(InMemoryDb::new());

        let result = catalog
            .update_product(&ProductId(1), ProductChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn duplicate_category_name_is_a_field_error() {
        let catalog = catalog_with(InMemoryDb::new().with_category(test_category("Tea")));

        let result = catalog
            .create_category(NewCategory {
                name: "Tea".to_string(),
                image: None,
            })
            .await;

        match result {
            Err(DomainError::Validation(fields)) => {
                assert_eq!(fields.get("name").unwrap(), [DUPLICATE_NAME]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn deleting_category_removes_its_products() {
        let category = test_category("Tea");
        let catalog = catalog_with(
            InMemoryDb::new()
                .with_category(category.clone())
                .with_product(test_product(dec!(3.00), 1)),
        );
        assert_eq!(catalog.list_products(100, 0).await.unwrap().len(), 1);

        assert!(catalog.delete_category(&category.id).await.unwrap());

        assert!(catalog.list_products(100, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn offer_partial_update_keeps_other_fields() {
        let offer = test_offer();
        let catalog = catalog_with(InMemoryDb::new().with_offer(offer.clone()));

        let changes = OfferChanges {
            discount_percentage: Some(12.5),
            ..Default::default()
        };
        let updated = catalog.update_offer(&offer.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.discount_percentage, 12.5);
        assert_eq!(updated.title, offer.title);
        assert_eq!(updated.applicable_minimum_quantity, offer.applicable_minimum_quantity);
    }

    #[tokio::test]
    async fn list_pages_by_id() {
        let db = InMemoryDb::new();
        let catalog = catalog_with(db);
        for name in ["Tea", "Coffee", "Cocoa"] {
            catalog
                .create_category(NewCategory {
                    name: name.to_string(),
                    image: None,
                })
                .await
                .unwrap();
        }

        let page = catalog.list_categories(2, 1).await.unwrap();

        let names: Vec<&str> = page.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Coffee", "Cocoa"]);
    }
}
