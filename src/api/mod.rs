//! REST API module.
//!
//! Public page models, map widgets and the admin portal endpoints.

mod admin;
mod images;
mod manage;
mod maps;
mod pages;
mod team;

pub use admin::*;
pub use images::*;
pub use manage::*;
pub use maps::*;
pub use pages::*;
pub use team::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type for handlers whose errors carry no extra context.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize, E>(data: T) -> Result<ApiResponse<T>, E> {
    Ok(ApiResponse::new(data))
}
