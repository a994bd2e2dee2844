//! PostgreSQL adapter for OfferRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

use crate::domain::entities::{NewOffer, Offer, OfferId};
use crate::domain::ports::OfferRepository;
use crate::entity::offers;
use crate::error::DomainError;

/// PostgreSQL implementation of OfferRepository
pub struct PostgresOfferRepository {
    db: DatabaseConnection,
}

impl PostgresOfferRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        let result = offers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<Offer>, DomainError> {
        let results = offers::Entity::find()
            .order_by_asc(offers::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, offer: &NewOffer) -> Result<Offer, DomainError> {
        let model = offers::ActiveModel {
            title: Set(offer.title.clone()),
            description: Set(offer.description.clone()),
            discount_percentage: Set(offer.discount_percentage),
            applicable_minimum_quantity: Set(offer.applicable_minimum_quantity),
            image: Set(offer.image.clone()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, offer: &Offer) -> Result<Offer, DomainError> {
        let result = offers::ActiveModel {
            id: Set(offer.id.0),
            title: Set(offer.title.clone()),
            description: Set(offer.description.clone()),
            discount_percentage: Set(offer.discount_percentage),
            applicable_minimum_quantity: Set(offer.applicable_minimum_quantity),
            image: Set(offer.image.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &OfferId) -> Result<bool, DomainError> {
        let result = offers::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<offers::Model> for Offer {
    fn from(model: offers::Model) -> Self {
        Offer {
            id: OfferId(model.id),
            title: model.title,
            description: model.description,
            discount_percentage: model.discount_percentage,
            applicable_minimum_quantity: model.applicable_minimum_quantity,
            image: model.image,
        }
    }
}
