//! API Routes Module
//!
//! All HTTP endpoints.
//!
//! # Routes
//! - `/health` - health check
//! - `/api/auth/*` - login, registration, password reset
//! - `/api/assets/*` - asset CRUD
//! - `/api/charts/*` - chart data and monthly entry CRUD
//! - `/api/dashboard` - composed dashboard view
//! - `/api/settings` - per-user display preferences

pub mod health;
pub mod auth;
pub mod assets;
pub mod charts;
pub mod dashboard;
pub mod settings;
