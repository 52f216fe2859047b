//! Error-to-HTTP mapping for the gateway.
//!
//! Every remote failure is translated one-to-one to an HTTP error and
//! returned immediately; there are no retries and no local recovery. Error
//! bodies are `{"detail": <message>}`, the wire contract the management UI
//! consumes. Stripe's message text is surfaced verbatim for 400/500
//! responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use payrelay_stripe::Error as StripeError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization` header on a protected route.
    #[error("API key required")]
    MissingApiKey,

    /// Anything Stripe or the transport reported.
    #[error(transparent)]
    Stripe(#[from] StripeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::MissingApiKey => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Stripe(StripeError::Authentication { .. }) => {
                (StatusCode::UNAUTHORIZED, "Invalid API key".to_string())
            }
            Self::Stripe(StripeError::InvalidRequest { message }) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            Self::Stripe(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(status = status.as_u16(), detail = %detail, "Request failed")
            }
            _ => tracing::warn!(status = status.as_u16(), detail = %detail, "Request rejected"),
        }

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
