//! Money Manager API Library
//!
//! # Overview
//!
//! Backend for a multi-tenant personal-finance tracker: users register and
//! log in, record assets (named holdings with amount, target, investment
//! type and risk category) and monthly savings entries, and read aggregate
//! breakdowns for the dashboard and charts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │  │Services │  │   DB    │  │  Types  │    │
//! │  └────┬────┘  └────┬────┘  └────┬────┘  └────┬────┘    │
//! │       │            │            │            │          │
//! │       └────────────┴────────────┴────────────┘          │
//! │                         │                                │
//! └─────────────────────────┼────────────────────────────────┘
//!                           │
//!                           ▼
//!                  ┌────────────────┐
//!                  │   PostgreSQL   │
//!                  └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `error`: error types and HTTP status mapping
//! - `routes`: HTTP endpoint handlers
//! - `services`: business logic (auth, tokens, aggregation)
//! - `db`: database access, per-user scoped queries
//! - `types`: DTOs shared across route modules

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod db;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use db::Database;
pub use services::{AuthService, TokenService};

/// Application-wide shared state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<Config>,
}
