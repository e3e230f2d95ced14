//! # shelf_api
//!
//! HTTP API library for Shelf.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};
use shelf_core::auth::jwt::TokenService;
use shelf_core::auth::queries::{PgUserStore, UserStore};
use shelf_core::products::queries::{PgProductStore, ProductStore};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, products, users};
use crate::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential store.
    pub users: Arc<dyn UserStore>,
    /// Product store.
    pub products: Arc<dyn ProductStore>,
    /// Access token issuer/verifier, keyed by the configured secret.
    pub tokens: Arc<TokenService>,
    /// PostgreSQL pool backing the stores, when there is one.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// State backed by PostgreSQL stores sharing `pool`.
    pub fn postgres(pool: PgPool, config: &ApiConfig) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            products: Arc::new(PgProductStore::new(pool.clone())),
            tokens: Arc::new(TokenService::new(
                config.jwt_secret.as_bytes(),
                config.token_ttl,
            )),
            pool: Some(pool),
        }
    }

    /// State backed by arbitrary stores (no pool; health reports connected).
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            users,
            products,
            tokens: Arc::new(TokenService::new(
                config.jwt_secret.as_bytes(),
                config.token_ttl,
            )),
            pool: None,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `shelf_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    shelf_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(
            routes::ROOT,
            get(|| async { Redirect::temporary(&format!("{}/", routes::DOCS)) }),
        )
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_USERS, post(users::register_handler))
        .route(routes::POST_USERS_NO_SLASH, post(users::register_handler))
        .route(routes::POST_TOKEN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            routes::PRODUCTS,
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            routes::PRODUCTS_ID,
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new(routes::DOCS).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
