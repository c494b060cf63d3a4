//! Error handling module for the EPIC gateway.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INVALID_PASSWORD: &str = "INVALID_PASSWORD";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const IMAGE_ERROR: &str = "IMAGE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Missing, invalid, expired or revoked admin session
    Unauthorized(String),
    /// Login rejected by the backend
    InvalidPassword,
    /// Backend refused the login attempt with 429
    RateLimited(String),
    /// Resource not found
    NotFound(String),
    /// Client-side validation failed before any backend call
    Validation(String),
    /// Backend unreachable or answered with a non-success status
    Backend { status: Option<u16>, message: String },
    /// Image could not be decoded or re-encoded
    Image(String),
    /// Internal server error
    Internal(String),
    /// Bad request
    BadRequest(String),
    /// Invalid configuration value
    Config(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidPassword => StatusCode::UNAUTHORIZED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Backend { .. } => StatusCode::BAD_GATEWAY,
            AppError::Image(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::InvalidPassword => codes::INVALID_PASSWORD,
            AppError::RateLimited(_) => codes::RATE_LIMITED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Backend { .. } => codes::BACKEND_ERROR,
            AppError::Image(_) => codes::IMAGE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::InvalidPassword => "Invalid password".to_string(),
            AppError::RateLimited(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Backend { message, .. } => message.clone(),
            AppError::Image(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Backend request error: {:?}", err);
        AppError::Backend {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Backend request failed: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Backend {
            status: None,
            message: format!("Unexpected backend payload: {}", err),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        tracing::warn!("Image error: {:?}", err);
        AppError::Image(format!("Image processing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("Session token rejected: {:?}", err);
        AppError::Unauthorized("Invalid or expired session".to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::warn!("Multipart error: {:?}", err);
        AppError::BadRequest(format!("Malformed form data: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError, details: Option<serde_json::Value>) -> Self {
        let details = details.or_else(|| match error {
            AppError::Backend {
                status: Some(status),
                ..
            } => Some(serde_json::json!({ "backendStatus": status })),
            _ => None,
        });

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self, None);
        (status, Json(body)).into_response()
    }
}

/// Navigation target shown next to an error panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackLink {
    pub label: String,
    pub href: String,
}

/// Wrapper type for errors rendered as an error panel with a way back.
#[derive(Debug)]
pub struct AppErrorWithBackLink {
    pub error: AppError,
    pub back: BackLink,
}

impl IntoResponse for AppErrorWithBackLink {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, Some(serde_json::json!({ "back": self.back })));
        (status, Json(body)).into_response()
    }
}
