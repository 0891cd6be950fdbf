//! Shared-secret check for the webhook routes.

use axum::http::HeaderMap;
use coachdb_core::API_KEY_HEADER;

use crate::api_error::ApiError;

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Accept the request only if `X-API-Key` matches the configured secret.
///
/// No configured secret disables the webhook (503). A missing or wrong
/// header is 401.
pub fn require_api_key(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
    let Some(expected) = expected.filter(|k| !k.is_empty()) else {
        return Err(ApiError::ServiceUnavailable("webhook API key is not configured".to_owned()));
    };
    let provided = headers.get(API_KEY_HEADER).map(|v| v.as_bytes()).unwrap_or_default();
    if constant_time_eq(provided, expected.as_bytes()) {
        Ok(())
    } else {
        tracing::warn!("rejected webhook request with invalid API key");
        Err(ApiError::Unauthorized)
    }
}
