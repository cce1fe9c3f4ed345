//! Database Models
//!
//! Row types for the four tables. Currency columns are numeric(18,2) and map
//! to `Decimal`; soft-deletable rows carry an `is_active` flag that every
//! query path filters on.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Registered user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,

    /// Unique, case-sensitive login name
    pub username: String,

    /// Base64-encoded SHA-256 digest of the password
    pub password_hash: String,

    pub email: String,

    /// Used as the verification factor for password reset
    pub phone_number: String,

    pub name: String,

    pub profile_photo_url: Option<String>,

    /// Set when the account is linked to a Google login
    pub google_id: Option<String>,

    pub created_at: DateTime<Utc>,

    pub last_login_at: Option<DateTime<Utc>>,
}

/// A named holding owned by one user
#[derive(Debug, Clone, FromRow)]
pub struct Asset {
    pub id: i32,

    pub user_id: i32,

    pub name: String,

    pub amount: Decimal,

    pub target_amount: Option<Decimal>,

    /// "Invested" | "Liquid" | "Lend" (unconstrained at this layer)
    pub investment_type: String,

    /// "Low" | "Moderate" | "High"
    pub risk_category: String,

    /// Soft-delete flag; inactive rows are invisible to normal reads
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// One monthly savings data point
///
/// (year, month) uniqueness per user is intentionally not enforced; the
/// charts render one point per entry.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyEntry {
    pub id: i32,

    pub user_id: i32,

    /// Display label, e.g. "Jan 2024"
    pub month_name: String,

    pub amount: Decimal,

    pub year: i32,

    /// 1-12
    pub month: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-user display preferences (1:1 with users, created lazily)
#[derive(Debug, Clone, FromRow)]
pub struct UserSettings {
    pub id: i32,

    pub user_id: i32,

    /// "Grid" | "Tiles" | "Table"
    pub dashboard_view_type: String,

    /// "Light" | "Dark"
    pub theme: String,

    pub show_amount: bool,

    pub show_percentage: bool,

    pub show_asset_name: bool,

    pub show_investment_type: bool,

    pub show_dashboard_assets: bool,

    pub dashboard_color_scheme: String,

    /// "Rectangle" | "Circle"
    pub button_shape: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}
