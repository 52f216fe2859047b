//! External bank-account management.
//!
//! Every operation resolves the caller's own account id first, then acts on
//! `/v1/accounts/{id}/external_accounts/...`. Adding an account is a
//! two-step remote protocol: raw bank details are exchanged for a single-use
//! token, and only the token is attached. The raw account and routing
//! numbers exist solely in that outbound token call; they are never logged
//! and never echoed back.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use payrelay_stripe::{BankAccount, BankAccountParams};

use crate::app::AppState;
use crate::error::ApiError;

const LIST_LIMIT: u32 = 10;

/// Direct projection of an external bank account.
#[derive(Debug, Serialize)]
pub struct BankAccountInfo {
    pub id: String,
    pub object: String,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub bank_name: Option<String>,
    pub country: String,
    pub currency: String,
    pub last4: String,
    pub routing_number: Option<String>,
    pub status: String,
    pub default_for_currency: bool,
}

impl From<BankAccount> for BankAccountInfo {
    fn from(ba: BankAccount) -> Self {
        Self {
            id: ba.id,
            object: ba.object,
            account_holder_name: ba.account_holder_name,
            account_holder_type: ba.account_holder_type,
            bank_name: ba.bank_name,
            country: ba.country,
            currency: ba.currency,
            last4: ba.last4,
            routing_number: ba.routing_number,
            status: ba.status,
            default_for_currency: ba.default_for_currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BankAccountList {
    pub data: Vec<BankAccountInfo>,
}

#[derive(Deserialize)]
pub struct AddBankAccountRequest {
    pub account_number: String,
    pub routing_number: String,
    pub account_holder_name: String,
    #[serde(default = "default_holder_type")]
    pub account_holder_type: String,
}

fn default_holder_type() -> String {
    "individual".to_string()
}

/// Only the tokenized result: id, bank name, last 4 digits, status.
#[derive(Debug, Serialize)]
pub struct BankAccountAdded {
    pub id: String,
    pub bank_name: Option<String>,
    pub last4: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct BankAccountMessage {
    pub message: String,
    pub bank_account_id: String,
}

/// `GET /api/stripe/bank-accounts`
pub async fn list_bank_accounts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BankAccountList>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let account = stripe.retrieve_account().await?;
    let bank_accounts = stripe.list_bank_accounts(&account.id, LIST_LIMIT).await?;

    Ok(Json(BankAccountList {
        data: bank_accounts
            .data
            .into_iter()
            .map(BankAccountInfo::from)
            .collect(),
    }))
}

/// `POST /api/stripe/bank-accounts`
pub async fn add_bank_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddBankAccountRequest>,
) -> Result<Json<BankAccountAdded>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let account = stripe.retrieve_account().await?;

    let token = stripe
        .create_bank_account_token(&BankAccountParams {
            account_number: request.account_number,
            routing_number: request.routing_number,
            account_holder_name: request.account_holder_name,
            account_holder_type: request.account_holder_type,
        })
        .await?;

    let bank_account = stripe.create_external_account(&account.id, &token.id).await?;
    tracing::info!(
        account = %account.id,
        bank_account = %bank_account.id,
        "Attached bank account"
    );

    Ok(Json(BankAccountAdded {
        id: bank_account.id,
        bank_name: bank_account.bank_name,
        last4: bank_account.last4,
        status: bank_account.status,
    }))
}

/// `DELETE /api/stripe/bank-accounts/{bank_account_id}`
pub async fn remove_bank_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(bank_account_id): Path<String>,
) -> Result<Json<BankAccountMessage>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let account = stripe.retrieve_account().await?;
    stripe
        .delete_external_account(&account.id, &bank_account_id)
        .await?;
    tracing::info!(account = %account.id, bank_account = %bank_account_id, "Deleted bank account");

    Ok(Json(BankAccountMessage {
        message: "Bank account deleted successfully".to_string(),
        bank_account_id,
    }))
}

/// `POST /api/stripe/bank-accounts/{bank_account_id}/default`
///
/// Currency compatibility is not checked here; Stripe rejects mismatches.
pub async fn set_default_bank_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(bank_account_id): Path<String>,
) -> Result<Json<BankAccountMessage>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let account = stripe.retrieve_account().await?;
    stripe
        .set_default_external_account(&account.id, &bank_account_id)
        .await?;
    tracing::info!(account = %account.id, bank_account = %bank_account_id, "Set default bank account");

    Ok(Json(BankAccountMessage {
        message: "Default bank account set successfully".to_string(),
        bank_account_id,
    }))
}
