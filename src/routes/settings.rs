//! Settings Endpoints
//!
//! Display preferences only, 1:1 per user. GET creates the row with
//! defaults on first access; PUT is a partial update where absent fields
//! are left untouched.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::db::SettingsPatch;
use crate::services::AuthUser;
use crate::types::UserSettingsDto;
use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
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

/// GET /api/settings
pub async fn get_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserSettingsDto>, ApiError> {
    let settings = state.db.get_or_create_settings(user.user_id).await?;
    Ok(Json(UserSettingsDto::from(&settings)))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettingsDto>, ApiError> {
    let patch = SettingsPatch {
        dashboard_view_type: request.dashboard_view_type,
        theme: request.theme,
        show_amount: request.show_amount,
        show_percentage: request.show_percentage,
        show_asset_name: request.show_asset_name,
        show_investment_type: request.show_investment_type,
        show_dashboard_assets: request.show_dashboard_assets,
        dashboard_color_scheme: request.dashboard_color_scheme,
        button_shape: request.button_shape,
    };

    let settings = state.db.update_settings(user.user_id, &patch).await?;
    Ok(Json(UserSettingsDto::from(&settings)))
}
