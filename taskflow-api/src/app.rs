/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskflow_api::{app::{build_router, AppState}, config::Config};
/// use taskflow_shared::store::JsonStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = Arc::new(JsonStore::open(config.store.path.clone()));
/// let state = AppState::new(store, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::routes;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use taskflow_shared::auth::middleware::create_jwt_middleware;
use taskflow_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Persistent store, injected behind the trait so the backend can be
    /// swapped without touching handlers
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.config.jwt.token_ttl_hours)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /auth/
/// │   ├── POST /register        # Create account (public)
/// │   ├── POST /login           # Obtain token (public)
/// │   └── GET  /me              # Current account (bearer token)
/// └── /tasks/                   # All bearer-token authenticated
///     ├── GET    /              # List (optional ?status=&priority=)
///     ├── POST   /              # Create
///     ├── GET    /:id           # Fetch one
///     ├── PUT    /:id           # Partial update
///     ├── DELETE /:id           # Delete
///     └── GET    /stats/summary # Aggregate counts
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive; the browser client is served from elsewhere)
/// 3. Bearer-token authentication (per-route-group)
pub fn build_router(state: AppState) -> Router {
    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes: register/login are public, /me requires a token
    let auth_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .layer(middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes (all require a token)
    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/stats/summary", get(routes::tasks::task_stats))
        .layer(middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
