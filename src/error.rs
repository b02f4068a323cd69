//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Requested time slot conflicts with an existing booking")]
    SlotConflict,

    #[error("Submitted {field} does not match the server-computed amount")]
    PriceMismatch { field: &'static str },

    #[error("Coupon has expired")]
    CouponExpired,

    #[error("Coupon usage limit reached")]
    CouponUsageExceeded,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned by every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound => "not_found",
            AppError::SlotConflict => "slot_conflict",
            AppError::PriceMismatch { .. } => "price_mismatch",
            AppError::CouponExpired => "coupon_expired",
            AppError::CouponUsageExceeded => "coupon_usage_exceeded",
            AppError::InvalidConfiguration(_) => "invalid_configuration",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::SlotConflict => StatusCode::CONFLICT,
            AppError::PriceMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CouponExpired => StatusCode::GONE,
            AppError::CouponUsageExceeded => StatusCode::CONFLICT,
            AppError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak database/internal details to the client
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
            AppError::InvalidConfiguration(msg) => {
                tracing::error!("Invalid configuration: {}", msg);
                "Invalid configuration".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error_type: self.error_type(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
