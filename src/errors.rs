//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every domain error carries
//! a stable machine code and at most one offending field name, so the
//! boundary (and clients) can branch without string matching.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Variants form a closed set: the boundary switches on them instead of
/// downcasting. Validation and domain errors are constructed once at the
/// detection site and returned unchanged up the call chain.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("User not found")]
    NotFound,

    #[error("Phone number already exists")]
    PhoneAlreadyExists,

    // Field validation
    #[error("Phone number must start with +62 followed by 10 to 13 digits")]
    IneligiblePhone,

    #[error("Password must be between 6 and 64 characters")]
    PasswordLength,

    #[error("Password must contain at least 1 capital character")]
    PasswordCapital,

    #[error("Password must contain at least 1 numeric character")]
    PasswordNumeric,

    #[error("Password must contain at least 1 special character")]
    PasswordSpecialChar,

    #[error("Full name must be between 3 and 60 characters")]
    FullNameLength,

    // Credentials & tokens
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid token")]
    InvalidToken,

    // Malformed input outside the validators
    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl AppError {
    /// Stable machine code for client-side branching
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "USER_NOT_FOUND",
            AppError::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            AppError::IneligiblePhone => "PHONE_INELIGIBLE",
            AppError::PasswordLength => "PASSWORD_LENGTH",
            AppError::PasswordCapital => "PASSWORD_CAPITAL",
            AppError::PasswordNumeric => "PASSWORD_NUMERIC",
            AppError::PasswordSpecialChar => "PASSWORD_SPECIAL_CHAR",
            AppError::FullNameLength => "FULL_NAME_LENGTH",
            AppError::InvalidPassword => "PASSWORD_INVALID",
            AppError::InvalidToken => "TOKEN_INVALID",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The single offending field, when one can be named
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::NotFound => Some("id"),
            AppError::PhoneAlreadyExists | AppError::IneligiblePhone => Some("phone_number"),
            AppError::PasswordLength
            | AppError::PasswordCapital
            | AppError::PasswordNumeric
            | AppError::PasswordSpecialChar
            | AppError::InvalidPassword => Some("password"),
            AppError::FullNameLength => Some("full_name"),
            _ => None,
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PhoneAlreadyExists => StatusCode::CONFLICT,
            AppError::IneligiblePhone
            | AppError::PasswordLength
            | AppError::PasswordCapital
            | AppError::PasswordNumeric
            | AppError::PasswordSpecialChar
            | AppError::FullNameLength
            | AppError::InvalidPassword
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                field: self.field(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
