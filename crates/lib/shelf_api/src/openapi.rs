//! OpenAPI document for the HTTP API.
//!
//! Served as JSON at [`routes::OPENAPI_JSON`](crate::routes::OPENAPI_JSON) and
//! browsable through Swagger UI at [`routes::DOCS`](crate::routes::DOCS); the
//! root path redirects there.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{auth, health, products, users};
use crate::models::{
    DetailResponse, HealthResponse, LoginForm, ProductRequest, ProductResponse, RegisterRequest,
    TokenResponse, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelf API",
        description = "Product catalogue behind bearer-token authentication. \
                       Register with `POST /users/`, exchange credentials for a token \
                       at `POST /token`, then send `Authorization: Bearer <token>`."
    ),
    paths(
        health::health_handler,
        users::register_handler,
        auth::login_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::get_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
    ),
    components(schemas(
        RegisterRequest,
        LoginForm,
        TokenResponse,
        UserResponse,
        ProductRequest,
        ProductResponse,
        DetailResponse,
        HealthResponse,
    )),
    tags(
        (name = "auth", description = "Registration and token issuance"),
        (name = "products", description = "Product catalogue"),
        (name = "health", description = "Service status")
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by the product routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
