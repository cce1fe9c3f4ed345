//! Asset queries
//!
//! Every method scopes by (user_id, is_active = TRUE). Updates and deletes
//! against a row the user does not own, or an already-deleted row, simply
//! match nothing; callers see that as Option::None / false.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{Asset, Database};

/// Mutable asset fields, used for both create and full-replace update
pub struct AssetFields {
    pub name: String,
    pub amount: Decimal,
    pub target_amount: Option<Decimal>,
    pub investment_type: String,
    pub risk_category: String,
}

impl Database {
    /// All active assets for a user, ordered by name
    pub async fn list_assets(&self, user_id: i32) -> Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT
                id, user_id, name, amount, target_amount, investment_type,
                risk_category, is_active, created_at, updated_at
            FROM assets
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(assets)
    }

    /// One active asset, scoped to its owner
    pub async fn find_asset(&self, user_id: i32, asset_id: i32) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            SELECT
                id, user_id, name, amount, target_amount, investment_type,
                risk_category, is_active, created_at, updated_at
            FROM assets
            WHERE id = $1 AND user_id = $2 AND is_active = TRUE
            "#,
        )
        .bind(asset_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(asset)
    }

    /// Sum of active asset amounts for a user (0 when there are none)
    pub async fn total_asset_amount(&self, user_id: i32) -> Result<Decimal> {
        let (total,): (Option<Decimal>,) = sqlx::query_as(
            "SELECT SUM(amount) FROM assets WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(self.pool())
        .await?;

        Ok(total.unwrap_or_default())
    }

    pub async fn insert_asset(&self, user_id: i32, fields: &AssetFields) -> Result<Asset> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                user_id, name, amount, target_amount, investment_type,
                risk_category, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW())
            RETURNING
                id, user_id, name, amount, target_amount, investment_type,
                risk_category, is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(fields.target_amount)
        .bind(&fields.investment_type)
        .bind(&fields.risk_category)
        .fetch_one(self.pool())
        .await?;

        Ok(asset)
    }

    /// Full-replace update; None when the row is missing, inactive, or owned
    /// by another user
    pub async fn update_asset(
        &self,
        user_id: i32,
        asset_id: i32,
        fields: &AssetFields,
    ) -> Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET name = $1, amount = $2, target_amount = $3,
                investment_type = $4, risk_category = $5, updated_at = $6
            WHERE id = $7 AND user_id = $8 AND is_active = TRUE
            RETURNING
                id, user_id, name, amount, target_amount, investment_type,
                risk_category, is_active, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(fields.amount)
        .bind(fields.target_amount)
        .bind(&fields.investment_type)
        .bind(&fields.risk_category)
        .bind(Utc::now())
        .bind(asset_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(asset)
    }

    /// Soft delete; false when nothing matched
    pub async fn soft_delete_asset(&self, user_id: i32, asset_id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET is_active = FALSE, updated_at = $1
            WHERE id = $2 AND user_id = $3 AND is_active = TRUE
            "#,
        )
        .bind(Utc::now())
        .bind(asset_id)
        .bind(user_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
