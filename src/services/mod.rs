//! Services Module
//!
//! Business logic layer.
//!
//! # Services
//! - `AuthService`: login, registration, password reset
//! - `TokenService`: bearer token issuance and verification
//! - `aggregation`: percentage-of-total and chart distributions

pub mod auth;
mod token;
pub mod aggregation;

pub use auth::AuthService;
pub use token::{AuthUser, Claims, TokenService};
