//! Monthly entry queries
//!
//! Same scoping rules as assets. Lists come back in chart order:
//! year ascending, then month ascending.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{Database, MonthlyEntry};

/// Mutable entry fields, used for both create and full-replace update
pub struct MonthlyEntryFields {
    pub month_name: String,
    pub amount: Decimal,
    pub year: i32,
    pub month: i32,
}

impl Database {
    /// Active entries for a user in chart order
    pub async fn list_monthly_entries(&self, user_id: i32) -> Result<Vec<MonthlyEntry>> {
        let entries = sqlx::query_as::<_, MonthlyEntry>(
            r#"
            SELECT
                id, user_id, month_name, amount, year, month,
                is_active, created_at, updated_at
            FROM monthly_entries
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY year, month
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(entries)
    }

    pub async fn insert_monthly_entry(
        &self,
        user_id: i32,
        fields: &MonthlyEntryFields,
    ) -> Result<MonthlyEntry> {
        let entry = sqlx::query_as::<_, MonthlyEntry>(
            r#"
            INSERT INTO monthly_entries (
                user_id, month_name, amount, year, month, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW())
            RETURNING
                id, user_id, month_name, amount, year, month,
                is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.month_name)
        .bind(fields.amount)
        .bind(fields.year)
        .bind(fields.month)
        .fetch_one(self.pool())
        .await?;

        Ok(entry)
    }

    /// Full-replace update; None when the row is missing, inactive, or owned
    /// by another user
    pub async fn update_monthly_entry(
        &self,
        user_id: i32,
        entry_id: i32,
        fields: &MonthlyEntryFields,
    ) -> Result<Option<MonthlyEntry>> {
        let entry = sqlx::query_as::<_, MonthlyEntry>(
            r#"
            UPDATE monthly_entries
            SET month_name = $1, amount = $2, year = $3, month = $4, updated_at = $5
            WHERE id = $6 AND user_id = $7 AND is_active = TRUE
            RETURNING
                id, user_id, month_name, amount, year, month,
                is_active, created_at, updated_at
            "#,
        )
        .bind(&fields.month_name)
        .bind(fields.amount)
        .bind(fields.year)
        .bind(fields.month)
        .bind(Utc::now())
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(entry)
    }

    /// Soft delete; false when nothing matched
    pub async fn soft_delete_monthly_entry(&self, user_id: i32, entry_id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE monthly_entries
            SET is_active = FALSE, updated_at = $1
            WHERE id = $2 AND user_id = $3 AND is_active = TRUE
            "#,
        )
        .bind(Utc::now())
        .bind(entry_id)
        .bind(user_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
