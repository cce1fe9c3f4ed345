//! Database Module
//!
//! PostgreSQL access through SQLx. All queries live on the `Database`
//! struct, grouped per entity in the submodules. Soft-delete filtering
//! (`is_active = TRUE`) and per-user scoping are applied inside these
//! methods, never at call sites, so no endpoint can accidentally expose
//! another user's rows or deleted rows.

mod models;
mod users;
mod assets;
mod entries;
mod settings;

pub use models::*;
pub use users::NewUser;
pub use assets::AssetFields;
pub use entries::MonthlyEntryFields;
pub use settings::SettingsPatch;

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Database connection and query owner
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (adjust with traffic)
    /// - min_connections: 1 (kept alive while idle)
    /// - acquire_timeout: 3s
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run embedded migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
