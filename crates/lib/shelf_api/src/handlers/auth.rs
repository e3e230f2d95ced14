//! Token issuance handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedForm;
use crate::models::{DetailResponse, LoginForm, TokenResponse};
use crate::services::auth;

/// Exchange form-encoded username + password for a bearer token.
#[utoipa::path(
    post,
    path = "/token",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 400, description = "Invalid form", body = DetailResponse),
        (status = 401, description = "Incorrect username or password", body = DetailResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        state.users.as_ref(),
        &state.tokens,
        &form.username,
        &form.password,
    )
    .await?;
    Ok(Json(resp))
}
