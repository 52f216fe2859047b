//! HTTP gateway for Stripe account, payout, and bank-account management.
//!
//! Every route under `/api/stripe/` expects the caller's own Stripe secret
//! key in the `Authorization` header. The gateway holds no credential and no
//! state: each request builds a request-scoped
//! [`StripeClient`](payrelay_stripe::StripeClient), issues one or two remote
//! calls, reshapes the response, and maps Stripe's errors to HTTP status
//! codes.
//!
//! ```text
//! Caller → PUT /api/stripe/profile          Authorization: Bearer sk_...
//!              ↓
//!         [auth: extract credential]        missing → 401
//!              ↓
//!         [StripeClient scoped to this request]
//!              ↓ POST https://api.stripe.com/v1/account
//!         [Stripe]
//!              ↓
//!         [reshape JSON, map errors]        auth → 401, params → 400, other → 500
//! ```

pub mod account;
pub mod app;
pub mod auth;
pub mod bank_accounts;
pub mod config;
pub mod env;
pub mod error;
pub mod payouts;

pub use app::{router, AppState};
pub use config::Config;
pub use error::ApiError;
