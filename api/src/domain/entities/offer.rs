//! Promotional offer domain entity

use serde::{Deserialize, Serialize};

use super::business_user::double_option;
use crate::domain::validation::FieldErrors;

/// Unique identifier for an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferId(pub i32);

impl From<i32> for OfferId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A promotional discount for orders above a minimum quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: String,
    pub discount_percentage: f64,
    pub applicable_minimum_quantity: i32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOffer {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub discount_percentage: f64,
    pub applicable_minimum_quantity: i32,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewOffer {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title, 255);
        if !self.discount_percentage.is_finite() {
            errors.add("discount_percentage", "A valid number is required.");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount_percentage: Option<f64>,
    pub applicable_minimum_quantity: Option<i32>,
    #[serde(default, with = "double_option")]
    pub image: Option<Option<String>>,
}

impl OfferChanges {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            errors.require_text("title", title, 255);
        }
        if matches!(self.discount_percentage, Some(p) if !p.is_finite()) {
            errors.add("discount_percentage", "A valid number is required.");
        }
        errors
    }

    pub fn apply_to(&self, offer: &mut Offer) {
        if let Some(title) = &self.title {
            offer.title = title.clone();
        }
        if let Some(description) = &self.description {
            offer.description = description.clone();
        }
        if let Some(percentage) = self.discount_percentage {
            offer.discount_percentage = percentage;
        }
        if let Some(quantity) = self.applicable_minimum_quantity {
            offer.applicable_minimum_quantity = quantity;
        }
        if let Some(image) = &self.image {
            offer.image = image.clone();
        }
    }
}

impl From<NewOffer> for OfferChanges {
    fn from(offer: NewOffer) -> Self {
        Self {
            title: Some(offer.title),
            description: Some(offer.description),
            discount_percentage: Some(offer.discount_percentage),
            applicable_minimum_quantity: Some(offer.applicable_minimum_quantity),
            image: Some(offer.image),
        }
    }
}
