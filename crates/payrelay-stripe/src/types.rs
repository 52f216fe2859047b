//! Stripe wire objects, deserialized as-is from the REST API.
//!
//! Monetary amounts stay in minor units (cents) here; the HTTP layer owns the
//! major-unit conversion shown to callers. Sub-objects Stripe may omit or
//! extend (`business_profile`, `requirements`) are kept as raw JSON values.

use serde::Deserialize;

/// The Stripe account bound to the caller's secret key (`GET /v1/account`).
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    /// Account type: `"standard"`, `"express"`, or `"custom"`.
    #[serde(rename = "type")]
    pub account_type: String,
    pub email: Option<String>,
    pub business_profile: Option<serde_json::Value>,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub requirements: Option<serde_json::Value>,
    pub country: Option<String>,
    pub default_currency: Option<String>,
}

/// A payout to an external account (`/v1/payouts`).
#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    pub id: String,
    /// Amount in minor currency units (cents for `usd`).
    pub amount: i64,
    pub currency: String,
    /// Expected arrival date, epoch seconds.
    pub arrival_date: i64,
    /// Creation time, epoch seconds.
    pub created: i64,
    /// `pending`, `in_transit`, `paid`, `failed`, or `canceled`.
    pub status: String,
    pub description: Option<String>,
    /// `standard` or `instant`.
    pub method: String,
    /// `bank_account` or `card`.
    #[serde(rename = "type")]
    pub payout_type: String,
}

/// An external bank account attached to the account
/// (`/v1/accounts/{id}/external_accounts`).
#[derive(Debug, Clone, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub object: String,
    pub account_holder_name: Option<String>,
    pub account_holder_type: Option<String>,
    pub bank_name: Option<String>,
    pub country: String,
    pub currency: String,
    pub last4: String,
    pub routing_number: Option<String>,
    /// `new`, `validated`, `verified`, `verification_failed`, or `errored`.
    pub status: String,
    #[serde(default)]
    pub default_for_currency: bool,
}

/// A single-use token wrapping raw bank details (`POST /v1/tokens`).
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub id: String,
}

/// Stripe's list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
}

/// Deletion receipt for an external account.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}
