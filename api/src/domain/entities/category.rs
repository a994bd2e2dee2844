//! Category domain entity

use serde::{Deserialize, Serialize};

use super::business_user::double_option;
use crate::domain::validation::FieldErrors;

/// Field error reported when a category name is already taken
pub const DUPLICATE_NAME: &str = "category with this name already exists.";

/// Unique identifier for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub i32);

impl From<i32> for CategoryId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product category; names are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &self.name, 255);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
}

impl CategoryChanges {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.require_text("name", name, 255);
        }
        errors
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(image) = &self.image {
            category.image = image.clone();
        }
    }
}

impl From<NewCategory> for CategoryChanges {
    fn from(category: NewCategory) -> Self {
        Self {
            name: Some(category.name),
            image: Some(category.image),
        }
    }
}
