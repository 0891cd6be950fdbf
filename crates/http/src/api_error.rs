//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.
//! Handlers return `Result<Json<T>, ApiError>` instead of bare `StatusCode`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coachdb_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: malformed body, query or field.
    BadRequest(String),
    /// 401 Unauthorized: missing or wrong webhook key.
    Unauthorized,
    /// 404 Not Found: requested coach or school doesn't exist.
    NotFound(String),
    /// 409 Conflict: the write collides with an existing row.
    Conflict(String),
    /// 422 Unprocessable Entity: well-formed request naming an unknown school.
    UnprocessableEntity(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 503 Service Unavailable: webhook secret not configured, or the
    /// database is busy.
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} '{id}' not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid or missing API key".to_owned()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UnknownSchool(school) => {
                Self::UnprocessableEntity(format!("unknown school: {school}"))
            },
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ref e if e.is_not_found() => Self::NotFound(err.to_string()),
            ref e if e.is_duplicate() => Self::Conflict(err.to_string()),
            ref e if e.is_transient() => {
                tracing::warn!(error = %err, "database busy");
                Self::ServiceUnavailable("database busy, retry later".to_owned())
            },
            _ => Self::Internal(err.into()),
        }
    }
}

// Malformed JSON and unknown fields are both caller mistakes; report them as
// 400 with the rejection text.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
