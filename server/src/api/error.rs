//! HTTP error responses
//!
//! Handler failures become `400 {"error": "<message>"}`. Access guard
//! failures become `403 {"error": "permission denied"}` whatever the cause.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bank_api_common::error::BankError;
use serde::{Deserialize, Serialize};

/// Message returned for every access-guard denial
pub const PERMISSION_DENIED: &str = "permission denied";

/// JSON error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub error: String,
}

/// Error returned from handlers and the access guard
#[derive(Debug)]
pub enum ApiError {
    /// 403 with the fixed denial message
    PermissionDenied,
    /// 400 with the given message
    BadRequest(String),
}

impl From<BankError> for ApiError {
    fn from(error: BankError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::PermissionDenied => (StatusCode::FORBIDDEN, PERMISSION_DENIED.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
