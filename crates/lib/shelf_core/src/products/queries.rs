//! Product store: catalogue persistence.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Page, ProductError};
use crate::models::product::{NewProduct, Product};

/// Persistence operations for catalogue products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product and return it with its assigned id.
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError>;

    /// Up to `page.limit` products after skipping `page.skip`, ordered by id.
    async fn list(&self, page: Page) -> Result<Vec<Product>, ProductError>;

    /// Fetch a product by id.
    async fn get(&self, id: i64) -> Result<Product, ProductError>;

    /// Replace title, description and price of an existing product.
    async fn update(&self, id: i64, product: NewProduct) -> Result<Product, ProductError>;

    /// Remove a product permanently.
    async fn delete(&self, id: i64) -> Result<(), ProductError>;
}

type ProductRow = (i64, String, String, f64);

fn from_row((id, title, description, price): ProductRow) -> Product {
    Product {
        id,
        title,
        description,
        price,
    }
}

/// PostgreSQL implementation of [`ProductStore`].
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (title, description, price) VALUES ($1, $2, $3) \
             RETURNING id, title, description, price",
        )
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(from_row(row))
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, title, description, price FROM products \
             ORDER BY id ASC OFFSET $1 LIMIT $2",
        )
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Product, ProductError> {
        sqlx::query_as::<_, ProductRow>(
            "SELECT id, title, description, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(from_row)
        .ok_or(ProductError::NotFound(id))
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<Product, ProductError> {
        sqlx::query_as::<_, ProductRow>(
            "UPDATE products SET title = $2, description = $3, price = $4 WHERE id = $1 \
             RETURNING id, title, description, price",
        )
        .bind(id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .fetch_optional(&self.pool)
        .await?
        .map(from_row)
        .ok_or(ProductError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}
