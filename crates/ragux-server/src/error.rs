//! Mapping of handler failures onto HTTP responses.

use std::any::Any;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ragux_protocol::{IssueCode, ValidationError};
use tracing::{debug, error};

pub enum ApiError {
    /// Bad request body or parameter. Always the caller's to fix.
    Validation(ValidationError),
    /// Anything else. The cause is logged, never returned.
    Internal(ragux_core::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::single(
            vec!["id".into()],
            IssueCode::InvalidParameter,
            rejection.body_text(),
        ))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationError::single(
            Vec::new(),
            IssueCode::InvalidParameter,
            rejection.body_text(),
        ))
    }
}

impl From<ragux_core::Error> for ApiError {
    fn from(err: ragux_core::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => {
                debug!(fields = ?err.fields(), "Rejected request: {}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": "Invalid request",
                        "details": err,
                    })),
                )
                    .into_response()
            }
            Self::Internal(err) => {
                error!("Request failed: {}", err);
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Response for a handler that panicked.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);
    internal_error_response()
}
