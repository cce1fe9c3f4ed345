//! User queries
//!
//! Lookups used by the auth flows. Username matching is exact and
//! case-sensitive; the forgot/reset flows accept either username or email.

use anyhow::Result;
use chrono::Utc;

use super::{Database, User};

/// Fields persisted for a new account
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub phone_number: String,
    pub name: String,
}

impl Database {
    /// Exact-match lookup by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, username, password_hash, email, phone_number, name,
                profile_photo_url, google_id, created_at, last_login_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    /// Lookup by username OR email, used by the password-reset flows
    pub async fn find_user_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, username, password_hash, email, phone_number, name,
                profile_photo_url, google_id, created_at, last_login_at
            FROM users
            WHERE username = $1 OR email = $1
            "#,
        )
        .bind(username_or_email)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(self.pool())
                .await?;

        Ok(exists)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool())
                .await?;

        Ok(exists)
    }

    pub async fn insert_user(&self, user: &NewUser) -> Result<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, email, phone_number, name, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.name)
        .fetch_one(self.pool())
        .await?;

        Ok(id)
    }

    /// Stamp the last successful login
    pub async fn touch_last_login(&self, user_id: i32) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Overwrite the stored password hash (password reset)
    pub async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
