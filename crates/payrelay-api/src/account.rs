//! Account projection and business-profile updates.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use payrelay_stripe::{Account, BusinessProfileParams};

use crate::app::AppState;
use crate::error::ApiError;

/// Projection of the remote account state at request time. Sub-objects Stripe
/// omits come back as `{}` rather than `null` so callers never distinguish
/// null from missing.
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub email: Option<String>,
    pub business_profile: serde_json::Value,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub requirements: serde_json::Value,
    pub country: Option<String>,
    pub default_currency: Option<String>,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_type: account.account_type,
            email: account.email,
            business_profile: non_null(account.business_profile),
            charges_enabled: account.charges_enabled,
            payouts_enabled: account.payouts_enabled,
            requirements: non_null(account.requirements),
            country: account.country,
            default_currency: account.default_currency,
        }
    }
}

/// Collapse both "absent" and JSON `null` to `{}`.
fn non_null(value: Option<serde_json::Value>) -> serde_json::Value {
    match value {
        Some(serde_json::Value::Null) | None => serde_json::json!({}),
        Some(v) => v,
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub business_name: Option<String>,
    pub url: Option<String>,
    pub support_phone: Option<String>,
    pub support_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub message: String,
    pub business_profile: serde_json::Value,
}

/// `GET /api/stripe/account`
pub async fn get_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccountInfo>, ApiError> {
    let stripe = state.stripe(&headers)?;
    let account = stripe.retrieve_account().await?;
    tracing::info!(account = %account.id, "Retrieved account");
    Ok(Json(AccountInfo::from(account)))
}

/// `PUT /api/stripe/profile`
///
/// Only non-empty fields are merged into the upstream update; an empty
/// request still issues the (no-op) call and returns the current profile.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdated>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let params = BusinessProfileParams {
        name: non_empty(request.business_name),
        url: non_empty(request.url),
        support_phone: non_empty(request.support_phone),
        support_email: non_empty(request.support_email),
    };

    let account = stripe.update_account(&params).await?;
    tracing::info!(account = %account.id, "Updated business profile");

    Ok(Json(ProfileUpdated {
        message: "Profile updated successfully".to_string(),
        business_profile: non_null(account.business_profile),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_subobjects_default_to_empty_objects() {
        let account: Account = serde_json::from_str(
            r#"{
                "id": "acct_1",
                "type": "express",
                "charges_enabled": true,
                "payouts_enabled": true
            }"#,
        )
        .unwrap();

        let info = AccountInfo::from(account);
        assert_eq!(info.business_profile, serde_json::json!({}));
        assert_eq!(info.requirements, serde_json::json!({}));
    }

    #[test]
    fn explicit_null_subobjects_also_default_to_empty_objects() {
        let account: Account = serde_json::from_str(
            r#"{
                "id": "acct_1",
                "type": "express",
                "business_profile": null,
                "requirements": null,
                "charges_enabled": true,
                "payouts_enabled": true
            }"#,
        )
        .unwrap();

        let info = AccountInfo::from(account);
        assert_eq!(info.business_profile, serde_json::json!({}));
        assert_eq!(info.requirements, serde_json::json!({}));
    }

    #[test]
    fn populated_profile_is_passed_through() {
        let account: Account = serde_json::from_str(
            r#"{
                "id": "acct_1",
                "type": "express",
                "business_profile": {"name": "Acme Co"},
                "charges_enabled": true,
                "payouts_enabled": true
            }"#,
        )
        .unwrap();

        let info = AccountInfo::from(account);
        assert_eq!(info.business_profile["name"], "Acme Co");
    }

    #[test]
    fn account_type_serializes_as_type() {
        let info = AccountInfo {
            id: "acct_1".to_string(),
            account_type: "express".to_string(),
            email: None,
            business_profile: serde_json::json!({}),
            charges_enabled: true,
            payouts_enabled: false,
            requirements: serde_json::json!({}),
            country: Some("US".to_string()),
            default_currency: Some("usd".to_string()),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "express");
        assert!(json.get("account_type").is_none());
    }

    #[test]
    fn empty_strings_are_not_merged() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }
}
