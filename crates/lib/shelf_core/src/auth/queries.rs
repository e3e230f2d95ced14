//! Credential store: user persistence.

use async_trait::async_trait;
use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::{User, UserWithPassword};

/// Persistence operations for registered users.
///
/// Users are created once and never updated or deleted.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user with an already-hashed password.
    ///
    /// Fails with [`AuthError::Conflict`] when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserWithPassword>, AuthError>;
}

/// PostgreSQL implementation of [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let result = sqlx::query_as::<_, (i64, String)>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id, username)) => Ok(User { id, username }),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AuthError::Conflict(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserWithPassword>, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id, username, password_hash)| UserWithPassword {
            user: User { id, username },
            password_hash,
        }))
    }
}
