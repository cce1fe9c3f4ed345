//! Money Manager API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Client (Mobile / Web)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                         │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                        ││
//! │  │  /health  /api/auth/*  /api/assets/*  /api/charts/*     ││
//! │  │           /api/dashboard  /api/settings                 ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Services Layer                        ││
//! │  │  AuthService    TokenService    aggregation             ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Data Layer                            ││
//! │  │  PostgreSQL (users, assets, monthly_entries, settings)  ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use money_manager_api::{routes, AppState, AuthService, Config, Database, TokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG=debug,sqlx=warn style level control
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "money_manager_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Money Manager API Server");

    let config = Config::from_env()?;
    tracing::info!("📋 Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("🗄️  Database connected");

    db.run_migrations().await?;
    tracing::info!("📦 Migrations completed");

    let db = Arc::new(db);
    let tokens = Arc::new(TokenService::new(&config));
    let auth = Arc::new(AuthService::new(db.clone(), tokens.clone()));

    let state = AppState {
        db,
        auth,
        tokens,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router
///
/// # Route Structure
///
/// ```text
/// GET  /health                            - server status
///
/// POST /api/auth/login                    - credentials -> bearer token
/// POST /api/auth/register                 - create account
/// GET  /api/auth/check-username/:username - live signup validation
/// POST /api/auth/forgot-password          - masked phone hint
/// POST /api/auth/reset-password           - phone-verified reset
///
/// GET|POST         /api/assets            - asset CRUD (auth required)
/// GET|PUT|DELETE   /api/assets/:id
///
/// GET              /api/charts            - composed chart payload
/// GET|POST         /api/charts/monthly    - monthly entry CRUD
/// PUT|DELETE       /api/charts/monthly/:id
///
/// GET              /api/dashboard         - composed dashboard view
/// GET|PUT          /api/settings          - display preferences
/// ```
fn create_router(state: AppState) -> Router {
    // Production allows only configured origins; development stays open for
    // local clients.
    let cors = if state.config.is_production() {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "https://yourdomain.com".to_string());
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Auth (no token required)
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        .route(
            "/api/auth/check-username/:username",
            get(routes::auth::check_username),
        )
        .route(
            "/api/auth/forgot-password",
            post(routes::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(routes::auth::reset_password),
        )
        // Assets
        .route(
            "/api/assets",
            get(routes::assets::list_assets).post(routes::assets::create_asset),
        )
        .route(
            "/api/assets/:id",
            get(routes::assets::get_asset)
                .put(routes::assets::update_asset)
                .delete(routes::assets::delete_asset),
        )
        // Charts
        .route("/api/charts", get(routes::charts::get_chart_data))
        .route(
            "/api/charts/monthly",
            get(routes::charts::list_monthly_entries).post(routes::charts::create_monthly_entry),
        )
        .route(
            "/api/charts/monthly/:id",
            put(routes::charts::update_monthly_entry)
                .delete(routes::charts::delete_monthly_entry),
        )
        // Dashboard
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        // Settings
        .route(
            "/api/settings",
            get(routes::settings::get_settings).put(routes::settings::update_settings),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State injection
        .with_state(state)
}
