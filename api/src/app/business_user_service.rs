//! Business user service
//!
//! Account management and the phone-number lookups used by the storefront.

use std::sync::Arc;

use crate::domain::entities::{BusinessUser, BusinessUserChanges, BusinessUserId, NewBusinessUser};
use crate::domain::ports::BusinessUserRepository;
use crate::domain::validation::FieldErrors;
use crate::error::DomainError;

/// Service for managing business users
pub struct BusinessUserService<R>
where
    R: BusinessUserRepository + ?Sized,
{
    users: Arc<R>,
}

impl<R> BusinessUserService<R>
where
    R: BusinessUserRepository + ?Sized,
{
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn list(&self, limit: u64, offset: u64) -> Result<Vec<BusinessUser>, DomainError> {
        self.users.list(limit, offset).await
    }

    pub async fn get(&self, id: &BusinessUserId) -> Result<Option<BusinessUser>, DomainError> {
        self.users.find_by_id(id).await
    }

    /// Exact-match lookup by phone number
    pub async fn get_by_phone(&self, phone: &str) -> Result<Option<BusinessUser>, DomainError> {
        self.users.find_by_phone(phone).await
    }

    /// Lookup by phone number after checking the number's format
    pub async fn lookup_by_phone(&self, phone: &str) -> Result<Option<BusinessUser>, DomainError> {
        let mut errors = FieldErrors::new();
        errors.phone("phone", phone);
        errors.into_result()?;

        self.users.find_by_phone(phone).await
    }

    /// Register a business user; the cashback balance starts at zero
    pub async fn create(&self, new_user: NewBusinessUser) -> Result<BusinessUser, DomainError> {
        new_user.validate().into_result()?;

        let user = self.users.create(&new_user).await?;
        tracing::info!(business_user_id = %user.id, "Business user registered");
        Ok(user)
    }

    /// Apply changes to an existing business user, `None` if it does not exist
    pub async fn update(
        &self,
        id: &BusinessUserId,
        changes: BusinessUserChanges,
    ) -> Result<Option<BusinessUser>, DomainError> {
        changes.validate().into_result()?;

        let Some(mut user) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut user);

        self.users.update(&user).await.map(Some)
    }

    pub async fn delete(&self, id: &BusinessUserId) -> Result<bool, DomainError> {
        self.users.delete(id).await
    }

    /// Delete the business user registered under `phone`, with their orders
    pub async fn delete_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        match self.users.find_by_phone(phone).await? {
            Some(user) => {
                let deleted = self.users.delete(&user.id).await?;
                if deleted {
                    tracing::info!(business_user_id = %user.id, "Business user deleted by phone");
                }
                Ok(deleted)
            }
            None => Ok(false),
        }
    }
}
