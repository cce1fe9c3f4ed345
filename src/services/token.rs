//! Bearer Token Service
//!
//! Signed, time-limited JWTs (HS256) carrying the acting user's identity.
//! Every endpoint outside the auth routes extracts `AuthUser` from the
//! Authorization header; a missing, expired, tampered, or unparseable token
//! is a 401 before the handler body runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::Config, db::User, error::ApiError, AppState};

/// Token validity window
const TOKEN_VALIDITY_DAYS: i64 = 30;

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per JWT convention
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Issues and verifies bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
        }
    }

    /// Issue a token for a freshly authenticated user
    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (Utc::now() + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Token signing failed: {:?}", e);
            ApiError::InternalError
        })
    }

    /// Verify signature, expiry, issuer and audience; returns the claims
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized)
    }

    /// Verify a token and parse its subject as the acting user id
    pub fn authenticate(&self, token: &str) -> Result<i32, ApiError> {
        let claims = self.verify(token)?;
        claims.sub.parse::<i32>().map_err(|_| ApiError::Unauthorized)
    }
}

/// The authenticated caller, extracted from `Authorization: Bearer <token>`
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i32,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let user_id = state.tokens.authenticate(token)?;

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> Config {
        Config {
            port: 3001,
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            jwt_issuer: "MoneyManagerAPI".to_string(),
            jwt_audience: "MoneyManagerClient".to_string(),
            environment: crate::config::Environment::Development,
        }
    }

    fn test_user() -> User {
        User {
            id: 42,
            username: "alice123".to_string(),
            password_hash: String::new(),
            email: "alice@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            name: "Alice".to_string(),
            profile_photo_url: None,
            google_id: None,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(&test_config());
        let token = tokens.issue(&test_user()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "alice123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(tokens.authenticate(&token).unwrap(), 42);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let tokens = TokenService::new(&test_config());
        let token = tokens.issue(&test_user()).unwrap();

        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();
        let other_tokens = TokenService::new(&other);

        assert!(other_tokens.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let tokens = TokenService::new(&test_config());
        let token = tokens.issue(&test_user()).unwrap();

        let mut other = test_config();
        other.jwt_audience = "SomeOtherClient".to_string();
        let other_tokens = TokenService::new(&other);

        assert!(other_tokens.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = TokenService::new(&test_config());
        assert!(tokens.authenticate("not-a-token").is_err());
    }
}
