//! Gateway configuration.

use crate::env::ReadEnv;

const DEFAULT_PORT: u16 = 8001;
const DEFAULT_CORS_ORIGINS: &str = "*";

/// Configuration for the gateway server.
///
/// Resolved from environment variables:
/// - `PORT`: HTTP listening port (default: 8001)
/// - `CORS_ORIGINS`: comma-separated allowed origins (default: `*`)
/// - `STRIPE_BASE_URL`: Stripe endpoint override, used by tests to point at a
///   mock server (default: `https://api.stripe.com`)
///
/// `MONGO_URL`/`DB_NAME` may be present for the deployment's status-check
/// log; the gateway never reads them.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub stripe_base_url: String,
}

impl Config {
    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        Self {
            port: env
                .var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_origins: env
                .var("CORS_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            stripe_base_url: env
                .var("STRIPE_BASE_URL")
                .unwrap_or_else(|_| payrelay_stripe::client::DEFAULT_BASE_URL.to_string()),
        }
    }

    /// True when CORS should allow any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
