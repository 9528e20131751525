//! # Snippetbox
//!
//! A server-rendered web application for pasting and sharing text snippets.
//!
//! Every request passes through a chain of middleware before reaching its handler:
//! - **standard** (all requests): panic recovery, request logging, security headers
//! - **dynamic** (pages): sessions, CSRF verification, authentication
//! - **protected** (account and authoring pages): the dynamic chain plus an authorization gate
//!
//! See `routes` for how the chains are attached.

mod config;
mod db;
mod error;
mod forms;
mod handlers;
mod middleware;
mod routes;
mod state;
mod templates;
mod validator;

#[cfg(test)]
mod testutil;

use std::net::SocketAddr;

use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::middleware::{recover, session::session_layer};
use crate::state::AppState;

/// How often expired sessions are purged from the store
const SESSION_CLEANUP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snippetbox=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    recover::install_panic_hook();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let db = db::connect(&config.database_url).await?;
    let state = AppState::new(db.clone());

    // Sessions live in the same SQLite database as the application data
    let session_store = SqliteStore::new(db);
    session_store.migrate().await?;

    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            tracing::debug!("Deleting expired sessions");
            if let Err(e) = cleanup_store.delete_expired().await {
                tracing::error!("Session cleanup failed: {:?}", e);
            }
        }
    });

    let app = routes::routes(
        state,
        session_layer(session_store, config.session_secure),
        &config.static_dir,
    );

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    // Peer addresses feed the `ip` field of the request log
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
