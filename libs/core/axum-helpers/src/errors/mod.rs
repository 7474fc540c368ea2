pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error response uses this shape, whatever produced it:
/// - `code`: machine-readable identifier (e.g. "NOT_FOUND")
/// - `message`: message safe to show an end user
/// - `developerMessage`: diagnostic detail, empty when there is nothing to add
///
/// # JSON Example
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Resource not found",
///   "developerMessage": "user 65f1c0ffee0000000000abcd not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(rename = "developerMessage")]
    pub developer_message: String,
}

impl ErrorResponse {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        developer_message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            developer_message: developer_message.into(),
        }
    }
}

/// A client-facing error with its own code and status.
///
/// Status defaults to 400; use [`ApplicationError::with_status`] for anything
/// else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationError {
    pub code: String,
    pub message: String,
    pub developer_message: String,
    pub status: StatusCode,
}

impl ApplicationError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        developer_message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            developer_message: developer_message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// Error for a well-known [`ErrorCode`], using its default message and status
    pub fn from_code(code: ErrorCode, developer_message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: code.default_message().to_string(),
            developer_message: developer_message.into(),
            status: code.status(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if !self.developer_message.is_empty() {
            write!(f, " ({})", self.developer_message)?;
        }
        Ok(())
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the single place where failures become HTTP status codes and
/// bodies. Server-side variants log their detail and answer with a generic
/// message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Application(ApplicationError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Unclassified error: {0}")]
    Unclassified(String),
}

impl From<ApplicationError> for AppError {
    fn from(err: ApplicationError) -> Self {
        AppError::Application(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Application(ApplicationError::from_code(
            ErrorCode::InvalidJson,
            rejection.body_text(),
        ))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Application(ApplicationError::from_code(
            ErrorCode::ValidationError,
            errors.to_string(),
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(
                        ErrorCode::NotFound.as_str(),
                        ErrorCode::NotFound.default_message(),
                        msg,
                    ),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::BadRequest.code(),
                    "Bad request: {}",
                    msg
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::BadRequest.as_str(), msg, ""),
                )
            }
            AppError::Application(err) => {
                tracing::info!(
                    status = err.status.as_u16(),
                    "Application error: {}",
                    err
                );
                (
                    err.status,
                    ErrorResponse::new(err.code, err.message, err.developer_message),
                )
            }
            AppError::Persistence(msg) => {
                tracing::error!(
                    error_code = ErrorCode::PersistenceError.code(),
                    "Persistence error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        ErrorCode::PersistenceError.as_str(),
                        ErrorCode::PersistenceError.default_message(),
                        "",
                    ),
                )
            }
            AppError::Unclassified(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Unclassified error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        ErrorCode::InternalError.as_str(),
                        ErrorCode::InternalError.default_message(),
                        "",
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
