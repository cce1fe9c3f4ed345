//! Auth Endpoints
//!
//! The only unauthenticated surface: login, registration, the live
//! username check, and the two-step phone-verified password reset.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::services::auth as auth_rules;
use crate::types::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, ResetPasswordResponse,
};
use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct CheckUsernameResponse {
    pub exists: bool,
}

/// POST /api/auth/login
///
/// # Response
///
/// ```json
/// {
///   "userId": 1,
///   "username": "alice123",
///   "name": "Alice",
///   "email": "alice@example.com",
///   "token": "eyJhbGci..."
/// }
/// ```
///
/// 401 for unknown username and wrong password alike.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    auth_rules::validate_login(&request)?;

    match state.auth.login(&request).await? {
        Some(response) => Ok(Json(response)),
        None => Err(ApiError::Unauthorized),
    }
}

/// POST /api/auth/register
///
/// 200 with `{success: true}` on creation, 400 with `{success: false}` when
/// the username or email is already taken.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    auth_rules::validate_registration(&request)?;

    let response = state.auth.register(&request).await?;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(response)))
}

/// GET /api/auth/check-username/:username
pub async fn check_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<CheckUsernameResponse>, ApiError> {
    let exists = state.auth.username_exists(&username).await?;
    Ok(Json(CheckUsernameResponse { exists }))
}

/// POST /api/auth/forgot-password
///
/// 200 with a masked phone hint when the account exists, 404 otherwise.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<ForgotPasswordResponse>), ApiError> {
    let response = state.auth.forgot_password(&request.username_or_email).await?;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    Ok((status, Json(response)))
}

/// POST /api/auth/reset-password
///
/// 200 on success, 400 when the account is unknown or the phone number
/// does not match.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<ResetPasswordResponse>), ApiError> {
    let response = state.auth.reset_password(&request).await?;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(response)))
}
