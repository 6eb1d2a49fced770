//! # hospitald — hospital back-office daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (`hospital.toml`, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the store, password hasher and token codec (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Make sure an administrator account exists
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hospital_adapter_auth_jwt::{Argon2Hasher, JwtCodec};
use hospital_adapter_http_axum::state::AppState;
use hospital_adapter_storage_sqlite_sqlx::pool;
use hospital_app::services::auth_service::{AuthPolicy, AuthService};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = pool::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("opening database")?;
    let store = db.store();

    // Services
    let policy = AuthPolicy {
        token_ttl: config.token_ttl(),
        default_permissions: config.auth.default_permissions.clone(),
    };
    let auth = AuthService::new(
        store.clone(),
        Argon2Hasher,
        JwtCodec::new(&config.auth.jwt_secret),
        policy,
    );
    if auth
        .ensure_admin(&config.auth.admin_username, &config.auth.admin_password)
        .await
        .context("creating administrator")?
    {
        if config.uses_default_admin_password() {
            tracing::warn!(
                username = %config.auth.admin_username,
                "administrator created with the built-in password, set HOSPITAL_ADMIN_PASSWORD"
            );
        } else {
            tracing::info!(
                username = %config.auth.admin_username,
                "administrator created"
            );
        }
    }

    // HTTP
    let app = hospital_adapter_http_axum::router::build(AppState::new(store, auth));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "hospitald listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hospitald stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
