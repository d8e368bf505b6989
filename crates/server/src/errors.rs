use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::ErrorBody;
use models::errors::ModelError;
use service::{auth::AuthError, errors::ServiceError};

/// Error answered to API clients as `{success: false, error, message}`.
///
/// `message` is the canonical phrase for the status; `detail` is only logged.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, None) }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, Some(detail.into()))
    }

    /// Mapping for writes: anything other than a missing row is unprocessable.
    pub fn mutation(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) | ServiceError::Model(ModelError::NotFound(msg)) => {
                Self::new(StatusCode::NOT_FOUND, Some(msg))
            }
            other => Self::unprocessable(other.to_string()),
        }
    }

    pub fn message(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported media type",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
            _ => "internal server error",
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let detail = self.detail.as_deref().unwrap_or_default();
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), %detail, "request failed");
        } else {
            warn!(status = self.status.as_u16(), %detail, "request rejected");
        }
        let body = ErrorBody::new(self.status.as_u16(), self.message());
        (self.status, Json(body)).into_response()
    }
}

/// Mapping for reads.
impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::NotFound(_) | ServiceError::Model(ModelError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Db(_) | ServiceError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, Some(e.to_string()))
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, Some(format!("[{}] {}", e.code(), e)))
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        let status = match &r {
            JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, Some(r.body_text()))
    }
}

/// A path id that is not an integer names no resource.
impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(StatusCode::NOT_FOUND, Some(r.body_text()))
    }
}

/// Answer for routes nothing matched.
pub async fn fallback() -> JsonApiError {
    JsonApiError::not_found()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
