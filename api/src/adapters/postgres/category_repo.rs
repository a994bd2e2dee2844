//! PostgreSQL adapter for CategoryRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use super::unique_violation_or_db;
use crate::domain::entities::{Category, CategoryId, NewCategory, DUPLICATE_NAME};
use crate::domain::ports::CategoryRepository;
use crate::entity::categories;
use crate::error::DomainError;

/// PostgreSQL implementation of CategoryRepository
pub struct PostgresCategoryRepository {
    db: DatabaseConnection,
}

impl PostgresCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let result = categories::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Category>, DomainError> {
        let results = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let model = categories::ActiveModel {
            name: Set(category.name.clone()),
            image: Set(category.image.clone()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation_or_db(e, "name", DUPLICATE_NAME))?;

        Ok(result.into())
    }

    async fn update(&self, category: &Category) -> Result<Category, DomainError> {
        let result = categories::ActiveModel {
            id: Set(category.id.0),
            name: Set(category.name.clone()),
            image: Set(category.image.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| unique_violation_or_db(e, "name", DUPLICATE_NAME))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, DomainError> {
        let result = categories::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Category {
            id: CategoryId(model.id),
            name: model.name,
            image: model.image,
        }
    }
}
