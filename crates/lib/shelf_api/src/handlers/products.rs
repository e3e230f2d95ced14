//! Product catalogue handlers. All routes require authentication; any
//! authenticated user may act on any product.

use axum::extract::State;
use axum::{Extension, Json};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DetailResponse, ListQuery, ProductRequest, ProductResponse};

/// List products in id order, `skip`/`limit` default to 0/10.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    security(("bearer" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "A page of products", body = Vec<ProductResponse>),
        (status = 400, description = "Negative or non-numeric skip/limit", body = DetailResponse),
        (status = 401, description = "Missing or invalid bearer token", body = DetailResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.products.list(query.page()).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer" = [])),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "The stored product with its id", body = ProductResponse),
        (status = 400, description = "Invalid product body", body = DetailResponse),
        (status = 401, description = "Missing or invalid bearer token", body = DetailResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products.create(body.into()).await?;
    info!(product_id = product.id, user = %user.0.username, "product created");
    Ok(Json(product.into()))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 401, description = "Missing or invalid bearer token", body = DetailResponse),
        (status = 404, description = "Product not found", body = DetailResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products.get(id).await?;
    Ok(Json(product.into()))
}

/// Replace title, description and price.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "The updated product", body = ProductResponse),
        (status = 400, description = "Invalid product body", body = DetailResponse),
        (status = 401, description = "Missing or invalid bearer token", body = DetailResponse),
        (status = 404, description = "Product not found", body = DetailResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(body): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.products.update(id, body.into()).await?;
    info!(product_id = id, user = %user.0.username, "product updated");
    Ok(Json(product.into()))
}

/// Remove a product permanently.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DetailResponse),
        (status = 401, description = "Missing or invalid bearer token", body = DetailResponse),
        (status = 404, description = "Product not found", body = DetailResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> AppResult<Json<DetailResponse>> {
    state.products.delete(id).await?;
    info!(product_id = id, user = %user.0.username, "product deleted");
    Ok(Json(DetailResponse::new("Product deleted")))
}
