//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{
    MSG_DUPLICATE_EMAIL, MSG_DUPLICATE_HOLIDAY, MSG_HOLIDAY_NOT_FOUND, MSG_UNEXPECTED_ERROR,
};

/// Field name to message map returned for rejected request bodies
pub type FieldErrors = BTreeMap<String, String>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Branch not found with ID: {0}")]
    BranchNotFound(String),

    #[error("{}", MSG_HOLIDAY_NOT_FOUND)]
    HolidayNotFound(NaiveDate),

    // Business rule violations
    #[error("{}", MSG_DUPLICATE_EMAIL)]
    DuplicateEmail(String),

    #[error("{}", MSG_DUPLICATE_HOLIDAY)]
    DuplicateHoliday(NaiveDate),

    // Validation
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Optimistic concurrency
    #[error("Branch {0} was modified concurrently")]
    VersionConflict(Uuid),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error body for everything except field validation
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BranchNotFound(_) | AppError::HolidayNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_)
            | AppError::DuplicateHoliday(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::VersionConflict(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),

            AppError::VersionConflict(id) => {
                tracing::error!(branch_id = %id, "Optimistic lock failure, update discarded");
                MSG_UNEXPECTED_ERROR.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                MSG_UNEXPECTED_ERROR.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                MSG_UNEXPECTED_ERROR.to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Validation(fields) = self {
            tracing::error!("Validation error: {:?}", fields);
            return (status, Json(fields)).into_response();
        }

        let message = self.user_message();
        if status.is_client_error() {
            tracing::warn!(status = %status.as_u16(), "{}", message);
        }

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error"),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_branch_not_found(self, id: Uuid) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_branch_not_found(self, id: Uuid) -> AppResult<T> {
        self.ok_or_else(|| AppError::BranchNotFound(id.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    /// Single-field validation failure
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), msg.into());
        AppError::Validation(fields)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
