//! Mandir Temple CMS Backend
//!
//! REST backend for the temple website: public post and gallery reads,
//! admin-token-gated mutations, SQLite records, external media host for
//! image content.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod media;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use media::{HttpMediaStore, MediaStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub media: Arc<dyn MediaStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mandir CMS Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Media host: {}", config.media_base_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if no admin token is configured
    if config.admin_token.is_none() {
        tracing::warn!("No admin token configured (MANDIR_ADMIN_TOKEN). Mutations are open!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize media host client
    let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(
        config.media_base_url.clone(),
        config.media_api_key.clone(),
    ));

    // Create application state
    let state = AppState {
        repo,
        media,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone token for the auth layer
    let admin_token = state.config.admin_token.clone();

    // Public read surface
    let public_routes = Router::new()
        .route("/gallery", get(api::list_gallery))
        .route("/posts", get(api::list_posts))
        .route("/posts/{id}", get(api::get_post));

    // Admin-mutating surface, verified server-side
    let admin_routes = Router::new()
        .route(
            "/gallery",
            post(api::upload_gallery).delete(api::delete_gallery_image),
        )
        .route("/posts", post(api::create_post).delete(api::delete_post))
        .route("/posts/{id}", put(api::update_post))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(admin_token.clone(), req, next)
        }));

    let api_routes = public_routes.merge(admin_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
