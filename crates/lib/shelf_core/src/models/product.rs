//! Product catalogue models.

use serde::{Deserialize, Serialize};

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// The mutable fields of a product, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// Builds the stored record for `id` from a create/update payload.
    pub fn from_new(id: i64, new: NewProduct) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
        }
    }
}
