//! Gateway server binary.
//!
//! # Environment variables
//!
//! | Variable          | Default                  | Description                       |
//! |-------------------|--------------------------|-----------------------------------|
//! | `PORT`            | `8001`                   | TCP port to listen on             |
//! | `CORS_ORIGINS`    | `*`                      | Comma-separated allowed origins   |
//! | `STRIPE_BASE_URL` | `https://api.stripe.com` | Stripe endpoint override (tests)  |
//! | `RUST_LOG`        | `info`                   | Log filter (tracing-subscriber)   |

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use payrelay_api::env::SystemEnv;
use payrelay_api::{router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env(&SystemEnv);
    let cors = cors_layer(&config)?;

    let state = AppState::new(reqwest::Client::new(), config.stripe_base_url.clone());
    let app = router(state).layer(cors);

    tracing::info!(
        port = config.port,
        stripe_base_url = %config.stripe_base_url,
        cors_origins = ?config.cors_origins,
        "Gateway starting"
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .context("Failed to bind TCP listener")?;

    tracing::info!(port = config.port, "Listening");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid origin in CORS_ORIGINS")?;
    Ok(layer.allow_origin(origins))
}
