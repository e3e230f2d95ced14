//! Product catalogue logic.

pub mod queries;

use thiserror::Error;

/// Default page size for product listings.
pub const DEFAULT_LIMIT: i64 = 10;

/// Product catalogue errors.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Offset pagination over the catalogue, ordered by id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Builds a page, rejecting negative offsets or sizes.
    pub fn new(skip: i64, limit: i64) -> Result<Self, ProductError> {
        if skip < 0 {
            return Err(ProductError::Validation("skip must not be negative".into()));
        }
        if limit < 0 {
            return Err(ProductError::Validation("limit must not be negative".into()));
        }
        Ok(Self { skip, limit })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
