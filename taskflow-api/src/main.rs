//! # TaskFlow API Server
//!
//! A task-tracking JSON API with token authentication and a file-backed
//! store. State loads from the snapshot file at startup and every mutation
//! rewrites it, so a restart picks up exactly where the last request left
//! off.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p taskflow-api
//! ```

use std::sync::Arc;

use taskflow_api::app::{build_router, AppState};
use taskflow_api::config::Config;
use taskflow_shared::store::JsonStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = Arc::new(JsonStore::open(config.store.path.clone()));
    tracing::info!(path = %config.store.path.display(), "Store initialized");

    let addr = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "TaskFlow API v{} listening on http://{}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
