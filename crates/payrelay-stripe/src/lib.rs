//! Request-scoped Stripe REST client.
//!
//! The gateway never holds a Stripe credential of its own: every inbound HTTP
//! request carries the caller's secret key, and a [`StripeClient`] is built
//! from it for the duration of that one request.
//!
//! ```text
//! Caller → GET /api/stripe/payouts
//!          Authorization: Bearer sk_test_abc
//!              ↓
//!         [StripeClient { secret_key: "sk_test_abc" }]
//!              ↓ GET https://api.stripe.com/v1/payouts?limit=10
//!              ↓ Authorization: Bearer sk_test_abc
//!         [Stripe]
//! ```
//!
//! The underlying `reqwest::Client` is shared across requests for connection
//! pooling only; it carries no default headers, so two concurrently live
//! [`StripeClient`] values with different keys cannot observe each other's
//! credential.

pub mod client;
pub mod error;
pub mod types;

pub use client::{BankAccountParams, BusinessProfileParams, StripeClient};
pub use error::{Error, Result};
pub use types::{Account, BankAccount, Deleted, List, Payout, Token};
