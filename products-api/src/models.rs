//! Product data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored product
///
/// Field names on the wire follow the camelCase timestamps clients already
/// consume (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the client-editable fields from a validated payload
    ///
    /// `availability` is left untouched when the payload omits it.
    pub fn apply(&mut self, payload: &ProductPayload) {
        self.name = payload.name.clone();
        self.price = payload.price;
        if let Some(availability) = payload.availability {
            self.availability = availability;
        }
    }

    /// Flip the availability flag
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}

/// Fields needed to insert a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<ProductPayload> for NewProduct {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: payload.name,
            price: payload.price,
            availability: payload.availability.unwrap_or(true),
        }
    }
}

/// A create/replace body that passed every payload rule
///
/// Only the validation gate constructs this type, so handlers can rely on a
/// non-empty `name` and a positive `price`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    pub availability: Option<bool>,
}
