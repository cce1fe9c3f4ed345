//! Authentication Service
//!
//! Login, registration, username checks, and the phone-verified password
//! reset flow.
//!
//! The stored credential is a bare base64-encoded SHA-256 digest of the
//! password, kept for compatibility with hashes the existing user base
//! already has on file. A migration to a salted, iterated scheme should
//! verify with the digest and re-hash on successful login.
//!
//! Password reset is authorized solely by an exact match on the stored
//! phone number; the forgot-password step discloses a masked hint
//! (all but the last 4 digits). Known weakness, preserved behavior.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::db::{Database, NewUser};
use crate::error::ApiError;
use crate::services::TokenService;
use crate::types::{
    ForgotPasswordResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, ResetPasswordResponse,
};

/// Special characters the password policy accepts
const PASSWORD_SPECIALS: &str = "@$!%*?&#";

pub struct AuthService {
    db: Arc<Database>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenService>) -> Self {
        Self { db, tokens }
    }

    /// Verify credentials and issue a token
    ///
    /// Returns None for an unknown username or a wrong password alike; the
    /// boundary maps both to the same 401 so the response never reveals
    /// whether the username existed. `last_login_at` is only stamped after
    /// the password verifies.
    pub async fn login(&self, request: &LoginRequest) -> Result<Option<LoginResponse>, ApiError> {
        let Some(user) = self.db.find_user_by_username(&request.username).await? else {
            tracing::debug!(username = %request.username, "login: unknown username");
            return Ok(None);
        };

        if !verify_password(&request.password, &user.password_hash) {
            tracing::debug!(username = %request.username, "login: password mismatch");
            return Ok(None);
        }

        self.db.touch_last_login(user.id).await?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = user.id, "login succeeded");

        Ok(Some(LoginResponse {
            user_id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            token,
        }))
    }

    /// Create an account; never auto-logs-in
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        if self.db.username_exists(&request.username).await? {
            return Ok(RegisterResponse {
                success: false,
                message: "Username already exists. Please choose a different username."
                    .to_string(),
            });
        }

        if self.db.email_exists(&request.email).await? {
            return Ok(RegisterResponse {
                success: false,
                message: "Email already registered. Please use a different email.".to_string(),
            });
        }

        let user_id = self
            .db
            .insert_user(&NewUser {
                username: request.username.clone(),
                password_hash: hash_password(&request.password),
                email: request.email.clone(),
                phone_number: request.phone_number.clone(),
                name: request.name.clone(),
            })
            .await?;

        tracing::info!(user_id, "account created");

        Ok(RegisterResponse {
            success: true,
            message: "Account created successfully! Please login with your credentials."
                .to_string(),
        })
    }

    /// Existence check used for live validation during signup
    pub async fn username_exists(&self, username: &str) -> Result<bool, ApiError> {
        Ok(self.db.username_exists(username).await?)
    }

    /// Start the reset flow: confirm the account exists and return a masked
    /// phone hint for the client to prompt with
    pub async fn forgot_password(
        &self,
        username_or_email: &str,
    ) -> Result<ForgotPasswordResponse, ApiError> {
        let Some(user) = self
            .db
            .find_user_by_username_or_email(username_or_email)
            .await?
        else {
            return Ok(ForgotPasswordResponse {
                success: false,
                message: "User not found with the provided username or email.".to_string(),
                phone_number_hint: None,
            });
        };

        Ok(ForgotPasswordResponse {
            success: true,
            message: "User found. Please verify your phone number to reset password.".to_string(),
            phone_number_hint: Some(mask_phone_number(&user.phone_number)),
        })
    }

    /// Complete the reset flow: phone number match is the sole factor
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ResetPasswordResponse, ApiError> {
        let Some(user) = self
            .db
            .find_user_by_username_or_email(&request.username_or_email)
            .await?
        else {
            return Ok(ResetPasswordResponse {
                success: false,
                message: "User not found.".to_string(),
            });
        };

        if user.phone_number != request.phone_number {
            tracing::warn!(user_id = user.id, "reset-password: phone verification failed");
            return Ok(ResetPasswordResponse {
                success: false,
                message: "Phone number verification failed.".to_string(),
            });
        }

        self.db
            .update_password_hash(user.id, &hash_password(&request.new_password))
            .await?;

        tracing::info!(user_id = user.id, "password reset");

        Ok(ResetPasswordResponse {
            success: true,
            message: "Password reset successfully. You can now login with your new password."
                .to_string(),
        })
    }
}

/// Base64-encoded SHA-256 digest of the UTF-8 password bytes
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    BASE64.encode(digest)
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// All but the last 4 characters replaced with '*'; "****" when shorter
/// than 4. Counted in characters, not bytes, so a stored number with a
/// non-ASCII character cannot split a char boundary.
pub fn mask_phone_number(phone_number: &str) -> String {
    let chars: Vec<char> = phone_number.chars().collect();
    if chars.len() < 4 {
        return "****".to_string();
    }

    let visible_at = chars.len() - 4;
    let mut masked = "*".repeat(visible_at);
    masked.extend(&chars[visible_at..]);
    masked
}

// ============ Input validation ============

/// Login only needs the length floors; the real check is the hash compare
pub fn validate_login(request: &LoginRequest) -> Result<(), ApiError> {
    if request.username.len() < 4 {
        return Err(ApiError::ValidationError(
            "Username must be at least 4 characters".to_string(),
        ));
    }
    if request.password.len() < 5 {
        return Err(ApiError::ValidationError(
            "Password must be at least 5 characters".to_string(),
        ));
    }
    Ok(())
}

/// Field-level registration checks, first failure wins
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.username.len() < 4 {
        return Err(ApiError::ValidationError(
            "Username must be at least 4 characters".to_string(),
        ));
    }
    if request.username.len() > 50 {
        return Err(ApiError::ValidationError(
            "Username must be at most 50 characters".to_string(),
        ));
    }
    validate_password(&request.password)?;
    if !looks_like_email(&request.email) {
        return Err(ApiError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }
    if !looks_like_phone(&request.phone_number) {
        return Err(ApiError::ValidationError(
            "Invalid phone number".to_string(),
        ));
    }
    if request.name.is_empty() || request.name.len() > 100 {
        return Err(ApiError::ValidationError("Name is required".to_string()));
    }
    Ok(())
}

/// At least 5 chars with one lowercase, one uppercase, one digit and one of
/// `@$!%*?&#`, drawn only from that alphabet
fn validate_password(password: &str) -> Result<(), ApiError> {
    let valid = password.len() >= 5
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));

    if valid {
        Ok(())
    } else {
        Err(ApiError::ValidationError(
            "Password must contain at least one uppercase letter, one lowercase letter, \
             one number and one special character"
                .to_string(),
        ))
    }
}

/// Digits plus the usual separators; at least one digit required
fn looks_like_phone(phone: &str) -> bool {
    phone.chars().any(|c| c.is_ascii_digit())
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || "+-() .".contains(c))
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_known_vector() {
        // sha256("password"), base64
        assert_eq!(
            hash_password("password"),
            "XohImNooBHFR0OVvjcYpJ3NgPQ1qq73WKhHvch0VQtg="
        );
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("Abc1@");
        assert!(verify_password("Abc1@", &hash));
        assert!(!verify_password("Abc1#", &hash));
        assert!(!verify_password("abc1@", &hash));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("9876543210"), "******3210");
        assert_eq!(mask_phone_number("1234"), "1234");
        assert_eq!(mask_phone_number("123"), "****");
        assert_eq!(mask_phone_number(""), "****");
    }

    #[test]
    fn test_mask_phone_number_multibyte() {
        // char-counted masking must not split a multibyte character
        assert_eq!(mask_phone_number("9é999"), "*é999");
        assert_eq!(mask_phone_number("０１２３４５６７８９"), "******６７８９");
        assert_eq!(mask_phone_number("éé"), "****");
    }

    #[test]
    fn test_looks_like_phone() {
        assert!(looks_like_phone("9876543210"));
        assert!(looks_like_phone("+1 (555) 123-4567"));
        assert!(!looks_like_phone(""));
        assert!(!looks_like_phone("+-() ."));
        assert!(!looks_like_phone("call me"));
        assert!(!looks_like_phone("9é999"));
    }

    #[test]
    fn test_validate_password_accepts_policy_match() {
        assert!(validate_password("Abc1@").is_ok());
        assert!(validate_password("Str0ng&Pass").is_ok());
    }

    #[test]
    fn test_validate_password_rejections() {
        assert!(validate_password("Ab1@").is_err()); // too short
        assert!(validate_password("abc1@").is_err()); // no uppercase
        assert!(validate_password("ABC1@").is_err()); // no lowercase
        assert!(validate_password("Abcd@").is_err()); // no digit
        assert!(validate_password("Abcd1").is_err()); // no special
        assert!(validate_password("Abc1@ ").is_err()); // space outside alphabet
    }

    #[test]
    fn test_validate_registration_field_order() {
        let mut request = RegisterRequest {
            username: "alice123".to_string(),
            password: "Abc1@".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            name: "Alice".to_string(),
        };
        assert!(validate_registration(&request).is_ok());

        request.username = "abc".to_string();
        assert!(validate_registration(&request).is_err());

        request.username = "alice123".to_string();
        request.email = "not-an-email".to_string();
        assert!(validate_registration(&request).is_err());

        request.email = "alice@example.com".to_string();
        request.phone_number = String::new();
        assert!(validate_registration(&request).is_err());
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.com"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.com"));
        assert!(!looks_like_email("a@.com"));
        assert!(!looks_like_email("ab.com"));
    }
}
