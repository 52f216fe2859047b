//! Router and shared state.

use axum::http::HeaderMap;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use payrelay_stripe::StripeClient;

use crate::error::ApiError;
use crate::{account, auth, bank_accounts, payouts};

/// Shared across requests: the pooled HTTP client (connections only, no
/// credential) and the Stripe endpoint. Everything credential-bearing is
/// built per request in [`AppState::stripe`].
#[derive(Clone)]
pub struct AppState {
    http: reqwest::Client,
    stripe_base_url: String,
}

impl AppState {
    pub fn new(http: reqwest::Client, stripe_base_url: impl Into<String>) -> Self {
        Self {
            http,
            stripe_base_url: stripe_base_url.into(),
        }
    }

    /// Build a Stripe client scoped to this request's credential.
    pub(crate) fn stripe(&self, headers: &HeaderMap) -> Result<StripeClient, ApiError> {
        let key = auth::api_key(headers)?;
        Ok(StripeClient::new(self.http.clone(), key).with_base_url(self.stripe_base_url.clone()))
    }
}

/// Build the gateway router. All routes live under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/", get(root))
        .route("/api/stripe/account", get(account::get_account))
        .route(
            "/api/stripe/payouts",
            get(payouts::list_payouts).post(payouts::create_payout),
        )
        .route(
            "/api/stripe/payouts/{payout_id}/cancel",
            post(payouts::cancel_payout),
        )
        .route(
            "/api/stripe/bank-accounts",
            get(bank_accounts::list_bank_accounts).post(bank_accounts::add_bank_account),
        )
        .route(
            "/api/stripe/bank-accounts/{bank_account_id}",
            delete(bank_accounts::remove_bank_account),
        )
        .route(
            "/api/stripe/bank-accounts/{bank_account_id}/default",
            post(bank_accounts::set_default_bank_account),
        )
        .route("/api/stripe/profile", put(account::update_profile))
        .with_state(state)
}

/// Liveness probe; the only route that skips credential extraction.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Stripe Connect Management API" }))
}
