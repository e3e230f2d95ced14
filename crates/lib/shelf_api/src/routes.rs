//! Route paths.

pub const POST_USERS: &str = "/users/";
pub const POST_USERS_NO_SLASH: &str = "/users";
pub const POST_TOKEN: &str = "/token";
pub const PRODUCTS: &str = "/products";
pub const PRODUCTS_ID: &str = "/products/{id}";
pub const GET_HEALTH: &str = "/health";
pub const ROOT: &str = "/";
pub const DOCS: &str = "/docs";
pub const OPENAPI_JSON: &str = "/openapi.json";
