//! API server configuration.

use std::time::Duration;

use shelf_core::auth::jwt::{DEFAULT_ACCESS_TOKEN_TTL, resolve_jwt_secret};
use tracing::warn;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access token lifetime.
    pub token_ttl: Duration,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                      | Default                             |
    /// |-------------------------------|-------------------------------------|
    /// | `BIND_ADDR`                   | `127.0.0.1:8000`                    |
    /// | `DATABASE_URL`                | `postgres://localhost:5432/shelf`   |
    /// | `JWT_SECRET` / `AUTH_SECRET`  | generated & persisted to file       |
    /// | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30`                                |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/shelf".into()),
            jwt_secret: resolve_jwt_secret(),
            token_ttl: token_ttl_from(std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES").ok().as_deref()),
        }
    }
}

/// Parses a TTL in minutes, falling back to the default on absent or invalid input.
pub fn token_ttl_from(minutes: Option<&str>) -> Duration {
    match minutes.map(str::trim) {
        None | Some("") => DEFAULT_ACCESS_TOKEN_TTL,
        Some(raw) => match raw.parse::<u64>() {
            Ok(m) => ttl_from_minutes(m),
            Err(_) => {
                warn!(value = raw, "invalid ACCESS_TOKEN_EXPIRE_MINUTES, using default");
                DEFAULT_ACCESS_TOKEN_TTL
            }
        },
    }
}

/// Converts a TTL in minutes; zero falls back to the default.
pub fn ttl_from_minutes(minutes: u64) -> Duration {
    if minutes == 0 {
        warn!("access token TTL of 0 minutes, using default");
        return DEFAULT_ACCESS_TOKEN_TTL;
    }
    Duration::from_secs(minutes.saturating_mul(60))
}
