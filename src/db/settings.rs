//! User settings queries
//!
//! Settings are 1:1 with users and created lazily on first access. The
//! get-or-create path inserts behind the user_id UNIQUE constraint
//! (ON CONFLICT DO NOTHING) so two concurrent first reads for a new user
//! cannot produce duplicate rows.

use anyhow::Result;
use chrono::Utc;

use super::{Database, UserSettings};

/// Partial update: only present fields overwrite stored values
#[derive(Default)]
pub struct SettingsPatch {
    pub dashboard_view_type: Option<String>,
    pub theme: Option<String>,
    pub show_amount: Option<bool>,
    pub show_percentage: Option<bool>,
    pub show_asset_name: Option<bool>,
    pub show_investment_type: Option<bool>,
    pub show_dashboard_assets: Option<bool>,
    pub dashboard_color_scheme: Option<String>,
    pub button_shape: Option<String>,
}

impl Database {
    /// Fetch the user's settings, creating the row with defaults on first
    /// access
    pub async fn get_or_create_settings(&self, user_id: i32) -> Result<UserSettings> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, created_at)
            VALUES ($1, NOW())
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(self.pool())
        .await?;

        let settings = sqlx::query_as::<_, UserSettings>(
            r#"
            SELECT
                id, user_id, dashboard_view_type, theme, show_amount,
                show_percentage, show_asset_name, show_investment_type,
                show_dashboard_assets, dashboard_color_scheme, button_shape,
                created_at, updated_at
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;

        Ok(settings)
    }

    /// Apply a partial update; COALESCE leaves absent fields untouched
    pub async fn update_settings(
        &self,
        user_id: i32,
        patch: &SettingsPatch,
    ) -> Result<UserSettings> {
        // Row may not exist yet if the first thing a new user does is save
        // preferences; create it before patching.
        self.get_or_create_settings(user_id).await?;

        let settings = sqlx::query_as::<_, UserSettings>(
            r#"
            UPDATE user_settings
            SET dashboard_view_type    = COALESCE($1, dashboard_view_type),
                theme                  = COALESCE($2, theme),
                show_amount            = COALESCE($3, show_amount),
                show_percentage        = COALESCE($4, show_percentage),
                show_asset_name        = COALESCE($5, show_asset_name),
                show_investment_type   = COALESCE($6, show_investment_type),
                show_dashboard_assets  = COALESCE($7, show_dashboard_assets),
                dashboard_color_scheme = COALESCE($8, dashboard_color_scheme),
                button_shape           = COALESCE($9, button_shape),
                updated_at             = $10
            WHERE user_id = $11
            RETURNING
                id, user_id, dashboard_view_type, theme, show_amount,
                show_percentage, show_asset_name, show_investment_type,
                show_dashboard_assets, dashboard_color_scheme, button_shape,
                created_at, updated_at
            "#,
        )
        .bind(&patch.dashboard_view_type)
        .bind(&patch.theme)
        .bind(patch.show_amount)
        .bind(patch.show_percentage)
        .bind(patch.show_asset_name)
        .bind(patch.show_investment_type)
        .bind(patch.show_dashboard_assets)
        .bind(&patch.dashboard_color_scheme)
        .bind(&patch.button_shape)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;

        Ok(settings)
    }
}
