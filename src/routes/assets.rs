//! Asset Endpoints
//!
//! CRUD for the caller's holdings. Every handler is scoped to the bearer's
//! user id; a row owned by someone else is indistinguishable from a missing
//! one. Percentages in responses are recomputed against the current active
//! total on every call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::AssetFields;
use crate::services::AuthUser;
use crate::types::AssetDto;
use crate::{error::ApiError, AppState};

// ============ Request Types ============

fn default_investment_type() -> String {
    "Liquid".to_string()
}

fn default_risk_category() -> String {
    "Low".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub name: String,
    pub amount: Decimal,
    pub target_amount: Option<Decimal>,
    #[serde(default = "default_investment_type")]
    pub investment_type: String,
    #[serde(default = "default_risk_category")]
    pub risk_category: String,
}

/// Full replace: all mutable fields must be supplied
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    pub name: String,
    pub amount: Decimal,
    pub target_amount: Option<Decimal>,
    pub investment_type: String,
    pub risk_category: String,
}

// ============ Handlers ============

/// GET /api/assets
pub async fn list_assets(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AssetDto>>, ApiError> {
    let assets = state.db.list_assets(user.user_id).await?;
    let total: Decimal = assets.iter().map(|a| a.amount).sum();

    let dtos = assets
        .iter()
        .map(|a| AssetDto::from_asset(a, total))
        .collect();

    Ok(Json(dtos))
}

/// GET /api/assets/:id
pub async fn get_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<AssetDto>, ApiError> {
    let asset = state
        .db
        .find_asset(user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Asset".to_string()))?;

    let total = state.db.total_asset_amount(user.user_id).await?;

    Ok(Json(AssetDto::from_asset(&asset, total)))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<AssetDto>), ApiError> {
    if request.name.is_empty() {
        return Err(ApiError::ValidationError("Name is required".to_string()));
    }

    let asset = state
        .db
        .insert_asset(
            user.user_id,
            &AssetFields {
                name: request.name,
                amount: request.amount,
                target_amount: request.target_amount,
                investment_type: request.investment_type,
                risk_category: request.risk_category,
            },
        )
        .await?;

    // the new row changes the total, so recompute after insert
    let total = state.db.total_asset_amount(user.user_id).await?;

    Ok((StatusCode::CREATED, Json(AssetDto::from_asset(&asset, total))))
}

/// PUT /api/assets/:id
pub async fn update_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<Json<AssetDto>, ApiError> {
    if request.name.is_empty() {
        return Err(ApiError::ValidationError("Name is required".to_string()));
    }

    let asset = state
        .db
        .update_asset(
            user.user_id,
            id,
            &AssetFields {
                name: request.name,
                amount: request.amount,
                target_amount: request.target_amount,
                investment_type: request.investment_type,
                risk_category: request.risk_category,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Asset".to_string()))?;

    let total = state.db.total_asset_amount(user.user_id).await?;

    Ok(Json(AssetDto::from_asset(&asset, total)))
}

/// DELETE /api/assets/:id
///
/// Soft delete; 404 when the row is already gone or not the caller's, so a
/// repeated delete does not report success twice.
pub async fn delete_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.db.soft_delete_asset(user.user_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Asset".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
