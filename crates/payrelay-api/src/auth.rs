//! Caller credential extraction.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::error::ApiError;

/// `strip_prefix` is byte-exact: a lowercase `bearer` scheme is passed
/// through verbatim rather than stripped.
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the Stripe secret key from the `Authorization` header.
///
/// `Bearer <key>` is stripped to `<key>`; any other value passes through
/// verbatim. No format validation happens here; a malformed key is
/// discovered when Stripe rejects it.
pub fn api_key(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingApiKey)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(key) => Ok(key.to_string()),
        None => Ok(value.to_string()),
    }
}
