//! Shelf API server binary.
//!
//! Connects to PostgreSQL, runs migrations and serves the HTTP API until
//! interrupted.

use std::time::Duration;

use clap::Parser;
use shelf_api::config::{ApiConfig, ttl_from_minutes};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the API server. Flags override the environment
/// (see [`ApiConfig::from_env`]).
#[derive(Parser, Debug)]
#[command(name = "shelf_api_server", about = "Shelf API server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Access token lifetime in minutes.
    #[arg(long)]
    token_ttl_minutes: Option<u64>,
}

impl Args {
    /// Environment configuration with command-line overrides applied.
    fn into_config(self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.pg_connection_url = url;
        }
        if let Some(minutes) = self.token_ttl_minutes {
            config.token_ttl = ttl_from_minutes(minutes);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,shelf_api=debug,shelf_core=debug")
                }),
        )
        .init();

    let args = Args::parse();
    let max_connections = args.max_connections;
    let config = args.into_config();

    info!(bind = %config.bind_addr, max_connections, "starting shelf_api_server");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.pg_connection_url)
        .await?;

    info!("running database migrations");
    shelf_api::migrate(&pool).await?;

    info!(ttl_secs = config.token_ttl.as_secs(), "access tokens configured");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = shelf_api::router(shelf_api::AppState::postgres(pool.clone(), &config));

    info!(addr = %local_addr, "REST API listening");
    info!("OpenAPI docs at http://{local_addr}/docs/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
