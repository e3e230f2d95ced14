//! Authentication service: register/login flows and the auth guard,
//! delegating to `shelf_core::auth`.

use shelf_core::auth::AuthError;
use shelf_core::auth::jwt::TokenService;
use shelf_core::auth::password;
use shelf_core::auth::queries::UserStore;
use shelf_core::models::auth::User;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::TokenResponse;

/// Run bcrypt work off the async worker threads.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("password task: {e}")))?
        .map_err(AppError::from)
}

/// Register a new user, storing only a bcrypt hash of the password.
pub async fn register(users: &dyn UserStore, username: &str, password: &str) -> AppResult<User> {
    let plaintext = password.to_string();
    let pw_hash = run_blocking(move || password::hash_password(&plaintext)).await?;

    let user = users.create_user(username, &pw_hash).await.map_err(|e| {
        if matches!(e, AuthError::Conflict(_)) {
            debug!(username, "registration rejected: username taken");
        }
        AppError::from(e)
    })?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Authenticate with username + password and issue a bearer token.
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> AppResult<TokenResponse> {
    let Some(record) = users.find_by_username(username).await? else {
        let plaintext = password.to_string();
        run_blocking(move || Ok(password::verify_unknown_user(&plaintext))).await?;
        warn!(username, "login failed: unknown user");
        return Err(AuthError::CredentialError.into());
    };

    let plaintext = password.to_string();
    let pw_hash = record.password_hash;
    let valid = run_blocking(move || password::verify_password(&plaintext, &pw_hash)).await?;
    if !valid {
        warn!(username, "login failed: wrong password");
        return Err(AuthError::CredentialError.into());
    }

    let access_token = tokens.issue(&record.user.username)?;
    info!(user_id = record.user.id, "access token issued");
    Ok(TokenResponse::bearer(access_token))
}

/// Resolve the caller behind a bearer token.
///
/// Fails with `Unauthorized` when the token does not verify or its subject no
/// longer exists.
pub async fn current_user(
    users: &dyn UserStore,
    tokens: &TokenService,
    token: &str,
) -> AppResult<User> {
    let username = tokens.verify(token).map_err(|e| {
        debug!(error = %e, "bearer token rejected");
        AppError::from(e)
    })?;

    match users.find_by_username(&username).await? {
        Some(record) => Ok(record.user),
        None => {
            debug!(username, "bearer token subject not found");
            Err(AuthError::InvalidToken(format!("unknown subject {username}")).into())
        }
    }
}
