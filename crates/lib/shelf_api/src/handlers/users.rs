//! User registration handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::{DetailResponse, RegisterRequest, UserResponse};
use crate::services::auth;

/// Register a new user. The password is never echoed back.
#[utoipa::path(
    post,
    path = "/users/",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "The registered user", body = UserResponse),
        (status = 400, description = "Username already registered or invalid body", body = DetailResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = auth::register(state.users.as_ref(), &body.username, &body.password).await?;
    Ok(Json(user.into()))
}
