//! PostgreSQL adapter for BusinessUserRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::unique_violation_or_db;
use crate::domain::entities::{BusinessUser, BusinessUserId, NewBusinessUser, DUPLICATE_PHONE};
use crate::domain::ports::BusinessUserRepository;
use crate::entity::business_users;
use crate::error::DomainError;

/// PostgreSQL implementation of BusinessUserRepository
pub struct PostgresBusinessUserRepository {
    db: DatabaseConnection,
}

impl PostgresBusinessUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BusinessUserRepository for PostgresBusinessUserRepository {
    async fn find_by_id(&self, id: &BusinessUserId) -> Result<Option<BusinessUser>, DomainError> {
        let result = business_users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<BusinessUser>, DomainError> {
        let result = business_users::Entity::find()
            .filter(business_users::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<BusinessUser>, DomainError> {
        let results = business_users::Entity::find()
            .order_by_asc(business_users::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, user: &NewBusinessUser) -> Result<BusinessUser, DomainError> {
        let model = business_users::ActiveModel {
            company_name: Set(user.company_name.clone()),
            contact_person: Set(user.contact_person.clone()),
            phone: Set(user.phone.clone()),
            uploaded_file: Set(user.uploaded_file.clone()),
            referral_code: Set(user.referral_code.clone()),
            cashback_amount: Set(Decimal::ZERO),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation_or_db(e, "phone", DUPLICATE_PHONE))?;

        Ok(result.into())
    }

    async fn update(&self, user: &BusinessUser) -> Result<BusinessUser, DomainError> {
        let result = business_users::ActiveModel {
            id: Set(user.id.0),
            company_name: Set(user.company_name.clone()),
            contact_person: Set(user.contact_person.clone()),
            phone: Set(user.phone.clone()),
            uploaded_file: Set(user.uploaded_file.clone()),
            referral_code: Set(user.referral_code.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| unique_violation_or_db(e, "phone", DUPLICATE_PHONE))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &BusinessUserId) -> Result<bool, DomainError> {
        let result = business_users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<business_users::Model> for BusinessUser {
    fn from(model: business_users::Model) -> Self {
        BusinessUser {
            id: BusinessUserId(model.id),
            company_name: model.company_name,
            contact_person: model.contact_person,
            phone: model.phone,
            uploaded_file: model.uploaded_file,
            referral_code: model.referral_code,
            cashback_amount: model.cashback_amount,
        }
    }
}
