//! Maps use-case failures onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Body was not valid JSON.
    MalformedBody(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::Authentication(_) => StatusCode::UNAUTHORIZED,
                DomainError::Authorization(_) => StatusCode::FORBIDDEN,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Domain(DomainError::Internal(detail)) => {
                error!(%detail, "request failed");
                json!({ "status": "error", "message": "internal server error" })
            }
            ApiError::Domain(err) => json!({ "status": "fail", "message": err.to_string() }),
            ApiError::MalformedBody(message) => json!({ "status": "fail", "message": message }),
        };
        (status, Json(body)).into_response()
    }
}
