//! Payout listing, creation, and cancellation.
//!
//! Payout state lives entirely upstream
//! (`pending → in_transit → paid | failed | canceled`); this module only
//! relays it. Amounts cross the boundary in minor units and are shown to
//! callers in major units.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use payrelay_stripe::Payout;

use crate::app::AppState;
use crate::error::ApiError;

const DEFAULT_LIST_LIMIT: u32 = 10;

/// Fixed minor-unit scale. Wrong for zero-decimal currencies (jpy, krw, ...);
/// kept as a documented limitation of the gateway.
const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

fn to_major_units(minor: i64) -> f64 {
    minor as f64 / MINOR_UNITS_PER_MAJOR
}

/// Truncates toward zero, matching upstream integer-cent semantics.
fn to_minor_units(major: f64) -> i64 {
    (major * MINOR_UNITS_PER_MAJOR) as i64
}

/// A listed payout, amounts in major units.
#[derive(Debug, Serialize)]
pub struct PayoutInfo {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub arrival_date: i64,
    pub status: String,
    pub description: Option<String>,
    pub created: i64,
    pub method: String,
    #[serde(rename = "type")]
    pub payout_type: String,
}

impl From<Payout> for PayoutInfo {
    fn from(payout: Payout) -> Self {
        Self {
            id: payout.id,
            amount: to_major_units(payout.amount),
            currency: payout.currency,
            arrival_date: payout.arrival_date,
            status: payout.status,
            description: payout.description,
            created: payout.created,
            method: payout.method,
            payout_type: payout.payout_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayoutList {
    pub data: Vec<PayoutInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePayoutRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub description: Option<String>,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Create response mirrors the upstream snapshot right after creation.
#[derive(Debug, Serialize)]
pub struct PayoutCreated {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub arrival_date: i64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PayoutCancelled {
    pub message: String,
    pub payout_id: String,
}

/// `GET /api/stripe/payouts?limit=N`
pub async fn list_payouts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PayoutList>, ApiError> {
    let stripe = state.stripe(&headers)?;
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let payouts = stripe.list_payouts(limit).await?;
    Ok(Json(PayoutList {
        data: payouts.data.into_iter().map(PayoutInfo::from).collect(),
    }))
}

/// `POST /api/stripe/payouts`
pub async fn create_payout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePayoutRequest>,
) -> Result<Json<PayoutCreated>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let amount_minor = to_minor_units(request.amount);
    let payout = stripe
        .create_payout(amount_minor, &request.currency, request.description.as_deref())
        .await?;
    tracing::info!(payout = %payout.id, amount_minor, currency = %payout.currency, "Created payout");

    Ok(Json(PayoutCreated {
        id: payout.id,
        amount: to_major_units(payout.amount),
        currency: payout.currency,
        status: payout.status,
        arrival_date: payout.arrival_date,
        description: payout.description,
    }))
}

/// `POST /api/stripe/payouts/{payout_id}/cancel`
///
/// Retrieves the payout first, then cancels. A settled or unknown payout
/// surfaces Stripe's rejection as a 400, never a silent success.
pub async fn cancel_payout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(payout_id): Path<String>,
) -> Result<Json<PayoutCancelled>, ApiError> {
    let stripe = state.stripe(&headers)?;

    let payout = stripe.retrieve_payout(&payout_id).await?;
    stripe.cancel_payout(&payout.id).await?;
    tracing::info!(payout = %payout.id, "Cancelled payout");

    Ok(Json(PayoutCancelled {
        message: "Payout cancelled successfully".to_string(),
        payout_id,
    }))
}
