//! Request and response bodies.
//!
//! Each request type implements [`Validate`]; the extractors in
//! [`crate::extract`] run it before a handler sees the value.

use serde::{Deserialize, Serialize};
use shelf_core::models::auth::User;
use shelf_core::models::product::{NewProduct, Product};
use shelf_core::products::{DEFAULT_LIMIT, Page};
use utoipa::{IntoParams, ToSchema};

use crate::extract::Validate;

/// `POST /users/` body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("username", &self.username)?;
        require_non_blank("password", &self.password)
    }
}

/// `POST /token` form (OAuth2 password flow). Extra fields such as
/// `grant_type` and `scope` are accepted and ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("username", &self.username)?;
        require_non_blank("password", &self.password)
    }
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// `POST /products` and `PUT /products/{id}` body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub title: String,
    pub description: String,
    /// Non-negative price.
    #[schema(minimum = 0.0)]
    pub price: f64,
}

impl Validate for ProductRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("title", &self.title)?;
        if !self.price.is_finite() {
            return Err("price must be a finite number".into());
        }
        if self.price < 0.0 {
            return Err("price must not be negative".into());
        }
        Ok(())
    }
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
        }
    }
}

/// Catalogue entry as returned by the product routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
        }
    }
}

/// `GET /products` query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of products to skip (default 0).
    pub skip: Option<i64>,
    /// Maximum number of products to return (default 10).
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

impl Validate for ListQuery {
    fn validate(&self) -> Result<(), String> {
        let page = self.page();
        Page::new(page.skip, page.limit)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Plain message body, used for errors and for delete confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}

fn require_non_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}
