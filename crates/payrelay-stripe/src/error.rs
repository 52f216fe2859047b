//! Error types for the Stripe client.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by Stripe or the transport underneath it.
#[derive(Debug, Error)]
pub enum Error {
    /// Stripe rejected the supplied secret key.
    #[error("{message}")]
    Authentication { message: String },

    /// Stripe rejected the request parameters (bad payout state, malformed
    /// bank details, unknown id, ...).
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Any other Stripe error payload.
    #[error("Stripe API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Connection, timeout, or body-read failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Shape of Stripe's error envelope: `{"error": {"type": ..., "message": ...}}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

impl Error {
    /// Map a non-2xx Stripe response to the error taxonomy.
    ///
    /// An unparseable body degrades to [`Error::Api`] carrying the raw text,
    /// so transport-level garbage still surfaces to the caller.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
        let (kind, message) = match parsed {
            Some(env) => (
                env.error.kind,
                env.error.message.unwrap_or_else(|| body.to_string()),
            ),
            None => (None, body.to_string()),
        };

        match (status, kind.as_deref()) {
            (401, _) | (_, Some("authentication_error")) => Self::Authentication { message },
            (_, Some("invalid_request_error")) => Self::InvalidRequest { message },
            _ => Self::Api { status, message },
        }
    }
}
