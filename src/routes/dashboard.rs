//! Dashboard Endpoint
//!
//! Read-only composition: total of active amounts, the per-asset list with
//! freshly computed percentages, and the user's settings (created with
//! defaults on first call). No logic of its own beyond delegation.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::services::AuthUser;
use crate::types::{AssetDto, UserSettingsDto};
use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub assets: Vec<AssetDto>,
    pub settings: UserSettingsDto,
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let assets = state.db.list_assets(user.user_id).await?;
    let settings = state.db.get_or_create_settings(user.user_id).await?;

    let total_amount: Decimal = assets.iter().map(|a| a.amount).sum();

    let asset_dtos = assets
        .iter()
        .map(|a| AssetDto::from_asset(a, total_amount))
        .collect();

    Ok(Json(DashboardResponse {
        total_amount,
        assets: asset_dtos,
        settings: UserSettingsDto::from(&settings),
    }))
}
