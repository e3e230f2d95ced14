//! Authentication logic.
//!
//! Provides password hashing, access-token management, and the credential
//! store shared by `shelf_api` and its tests.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Username already registered: {0}")]
    Conflict(String),

    #[error("Password too long")]
    PasswordTooLong,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
