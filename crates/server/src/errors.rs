use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::validation::ValidationErrors;
use service::errors::{Missing, ServiceError};
use thiserror::Error;
use tracing::{debug, error};

/// Body of every 500 response. Storage details only go to the log.
pub const SERVER_ERROR_MESSAGE: &str = "something Went Wrong!";

/// Failure side of every student endpoint.
///
/// Rendered as `{"status": <code>, ...}` with the same code as the transport
/// status.
#[derive(Debug, Error)]
pub enum StudentApiError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(Missing),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for StudentApiError {
    fn from(e: ServiceError) -> Self {
        debug!(code = e.code(), error = %e, "service call rejected");
        match e {
            ServiceError::Validation(v) => Self::Validation(v),
            ServiceError::NotFound(m) => Self::NotFound(m),
            ServiceError::Db(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for StudentApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add("body", rejection.body_text());
        Self::Validation(errors)
    }
}

impl From<QueryRejection> for StudentApiError {
    fn from(rejection: QueryRejection) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add("query", rejection.body_text());
        Self::Validation(errors)
    }
}

impl IntoResponse for StudentApiError {
    fn into_response(self) -> Response {
        match self {
            StudentApiError::Validation(errors) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let body = serde_json::json!({"status": status.as_u16(), "errors": errors});
                (status, Json(body)).into_response()
            }
            StudentApiError::NotFound(missing) => {
                let status = StatusCode::NOT_FOUND;
                let body = serde_json::json!({"status": status.as_u16(), "message": missing.message()});
                (status, Json(body)).into_response()
            }
            StudentApiError::Internal(detail) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                error!(error = %detail, "student request failed");
                let body = serde_json::json!({"status": status.as_u16(), "message": SERVER_ERROR_MESSAGE});
                (status, Json(body)).into_response()
            }
        }
    }
}
