//! Shared DTOs
//!
//! Request/response bodies used by more than one route module. Wire field
//! names are camelCase, matching what the mobile client sends and expects.
//! DTOs that only one endpoint uses live next to their handler instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::{Asset, MonthlyEntry, UserSettings};
use crate::services::aggregation;

// ============ Auth ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub username_or_email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: String,
    /// Masked phone number, e.g. "******3210"; the real number never leaves
    /// the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number_hint: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub username_or_email: String,
    pub new_password: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub success: bool,
    pub message: String,
}

// ============ Assets ============

/// Asset as the client sees it: name upper-cased for display, percentage
/// always freshly computed against the current active total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDto {
    pub id: i32,
    pub name: String,
    /// Serialized as a JSON number, matching what the client renders
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub target_amount: Option<Decimal>,
    pub investment_type: String,
    pub risk_category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

impl AssetDto {
    pub fn from_asset(asset: &Asset, total: Decimal) -> Self {
        Self {
            id: asset.id,
            name: asset.name.to_uppercase(),
            amount: asset.amount,
            target_amount: asset.target_amount,
            investment_type: asset.investment_type.clone(),
            risk_category: asset.risk_category.clone(),
            percentage: aggregation::percentage(asset.amount, total),
        }
    }
}

// ============ Monthly entries ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntryDto {
    pub id: i32,
    pub month_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub year: i32,
    pub month: i32,
}

impl From<&MonthlyEntry> for MonthlyEntryDto {
    fn from(entry: &MonthlyEntry) -> Self {
        Self {
            id: entry.id,
            month_name: entry.month_name.clone(),
            amount: entry.amount,
            year: entry.year,
            month: entry.month,
        }
    }
}

// ============ Settings ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsDto {
    pub id: i32,
    pub dashboard_view_type: String,
    pub theme: String,
    pub show_amount: bool,
    pub show_percentage: bool,
    pub show_asset_name: bool,
    pub show_investment_type: bool,
    pub show_dashboard_assets: bool,
    pub dashboard_color_scheme: String,
    pub button_shape: String,
}

impl From<&UserSettings> for UserSettingsDto {
    fn from(settings: &UserSettings) -> Self {
        Self {
            id: settings.id,
            dashboard_view_type: settings.dashboard_view_type.clone(),
            theme: settings.theme.clone(),
            show_amount: settings.show_amount,
            show_percentage: settings.show_percentage,
            show_asset_name: settings.show_asset_name,
            show_investment_type: settings.show_investment_type,
            show_dashboard_assets: settings.show_dashboard_assets,
            dashboard_color_scheme: settings.dashboard_color_scheme.clone(),
            button_shape: settings.button_shape.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stored_asset() -> Asset {
        Asset {
            id: 7,
            user_id: 1,
            name: "Mutual Fund".to_string(),
            amount: dec!(700),
            target_amount: Some(dec!(1000)),
            investment_type: "Invested".to_string(),
            risk_category: "Moderate".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_asset_dto_round_trips_stored_fields() {
        let dto = AssetDto::from_asset(&stored_asset(), dec!(1000));

        assert_eq!(dto.id, 7);
        assert_eq!(dto.name, "MUTUAL FUND");
        assert_eq!(dto.amount, dec!(700));
        assert_eq!(dto.target_amount, Some(dec!(1000)));
        assert_eq!(dto.investment_type, "Invested");
        assert_eq!(dto.risk_category, "Moderate");
        assert_eq!(dto.percentage, dec!(70.00));
    }

    #[test]
    fn test_asset_dto_zero_total() {
        let mut asset = stored_asset();
        asset.amount = dec!(0);
        let dto = AssetDto::from_asset(&asset, dec!(0));
        assert_eq!(dto.percentage, dec!(0));
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let dto = AssetDto::from_asset(&stored_asset(), dec!(1000));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("targetAmount").is_some());
        assert!(json.get("investmentType").is_some());
        assert!(json.get("riskCategory").is_some());
        assert!(json.get("target_amount").is_none());
    }

    #[test]
    fn test_amounts_serialize_as_json_numbers() {
        let dto = AssetDto::from_asset(&stored_asset(), dec!(1000));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json["amount"].is_number());
        assert!(json["targetAmount"].is_number());
        assert!(json["percentage"].is_number());
        assert_eq!(json["amount"], serde_json::json!(700.0));
        assert_eq!(json["percentage"], serde_json::json!(70.0));
    }

    #[test]
    fn test_forgot_password_hint_omitted_when_absent() {
        let response = ForgotPasswordResponse {
            success: false,
            message: "User not found with the provided username or email.".to_string(),
            phone_number_hint: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("phoneNumberHint").is_none());

        let response = ForgotPasswordResponse {
            success: true,
            message: "User found. Please verify your phone number to reset password.".to_string(),
            phone_number_hint: Some("******3210".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["phoneNumberHint"], "******3210");
    }
}
