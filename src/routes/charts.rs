//! Chart Endpoints
//!
//! The composed chart payload (monthly line data plus the three pie
//! distributions) and CRUD for monthly savings entries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::MonthlyEntryFields;
use crate::services::aggregation::{self, GroupBy, PieSlice};
use crate::services::AuthUser;
use crate::types::MonthlyEntryDto;
use crate::{error::ApiError, AppState};

// ============ Request/Response Types ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataResponse {
    /// One point per active entry, ordered (year, month) ascending
    pub monthly_data: Vec<MonthlyEntryDto>,
    pub investment_type_distribution: Vec<PieSlice>,
    pub asset_distribution: Vec<PieSlice>,
    pub risk_distribution: Vec<PieSlice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMonthlyEntryRequest {
    pub month_name: String,
    pub amount: Decimal,
    pub year: i32,
    pub month: i32,
}

/// Full replace: all mutable fields must be supplied
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMonthlyEntryRequest {
    pub month_name: String,
    pub amount: Decimal,
    pub year: i32,
    pub month: i32,
}

// ============ Handlers ============

/// GET /api/charts
///
/// # Response
///
/// ```json
/// {
///   "monthlyData": [{"id": 1, "monthName": "Jan 2024", "amount": 500.0, "year": 2024, "month": 1}],
///   "investmentTypeDistribution": [{"name": "Invested", "value": 700.0, "percentage": 70.0, "color": "#4CAF50"}],
///   "assetDistribution": [...],
///   "riskDistribution": [...]
/// }
/// ```
pub async fn get_chart_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ChartDataResponse>, ApiError> {
    let entries = state.db.list_monthly_entries(user.user_id).await?;
    let assets = state.db.list_assets(user.user_id).await?;

    Ok(Json(ChartDataResponse {
        monthly_data: entries.iter().map(MonthlyEntryDto::from).collect(),
        investment_type_distribution: aggregation::distribution(&assets, GroupBy::InvestmentType),
        asset_distribution: aggregation::distribution(&assets, GroupBy::AssetName),
        risk_distribution: aggregation::distribution(&assets, GroupBy::RiskCategory),
    }))
}

/// GET /api/charts/monthly
pub async fn list_monthly_entries(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<MonthlyEntryDto>>, ApiError> {
    let entries = state.db.list_monthly_entries(user.user_id).await?;
    Ok(Json(entries.iter().map(MonthlyEntryDto::from).collect()))
}

/// POST /api/charts/monthly
pub async fn create_monthly_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateMonthlyEntryRequest>,
) -> Result<(StatusCode, Json<MonthlyEntryDto>), ApiError> {
    if request.month_name.is_empty() {
        return Err(ApiError::ValidationError(
            "Month name is required".to_string(),
        ));
    }

    let entry = state
        .db
        .insert_monthly_entry(
            user.user_id,
            &MonthlyEntryFields {
                month_name: request.month_name,
                amount: request.amount,
                year: request.year,
                month: request.month,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MonthlyEntryDto::from(&entry))))
}

/// PUT /api/charts/monthly/:id
pub async fn update_monthly_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateMonthlyEntryRequest>,
) -> Result<Json<MonthlyEntryDto>, ApiError> {
    if request.month_name.is_empty() {
        return Err(ApiError::ValidationError(
            "Month name is required".to_string(),
        ));
    }

    let entry = state
        .db
        .update_monthly_entry(
            user.user_id,
            id,
            &MonthlyEntryFields {
                month_name: request.month_name,
                amount: request.amount,
                year: request.year,
                month: request.month,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Monthly entry".to_string()))?;

    Ok(Json(MonthlyEntryDto::from(&entry)))
}

/// DELETE /api/charts/monthly/:id
pub async fn delete_monthly_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.db.soft_delete_monthly_entry(user.user_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Monthly entry".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
