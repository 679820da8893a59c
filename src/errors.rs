//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every error carries a
//! kind that is surfaced to clients as the `type` of the error payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error kind reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, nothing was written
    Validation,
    /// Account creation rejected before any write
    UserCreation,
    /// Store, profile or hashing failure
    Server,
    /// Credential rotation failed, stored hash untouched
    PasswordUpdate,
    Unauthorized,
    Forbidden,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::UserCreation => "USER_CREATION_ERROR",
            ErrorKind::Server => "SERVER_ERROR",
            ErrorKind::PasswordUpdate => "PASSWORD_UPDATE_ERROR",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // Input
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    UserCreation(String),

    #[error("{0}")]
    PasswordUpdate(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl AppError {
    /// Kind reported to the client.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => ErrorKind::Unauthorized,
            AppError::Forbidden => ErrorKind::Forbidden,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::UserCreation(_) => ErrorKind::UserCreation,
            AppError::PasswordUpdate(_) => ErrorKind::PasswordUpdate,
            AppError::NotFound | AppError::Database(_) | AppError::Internal(_) => {
                ErrorKind::Server
            }
        }
    }

    /// Whether the failure already chose its own kind.
    ///
    /// Store, not-found and internal failures are unclassified and take
    /// the default kind of the workflow they surface from.
    pub fn is_classified(&self) -> bool {
        !matches!(
            self,
            AppError::NotFound | AppError::Database(_) | AppError::Internal(_)
        )
    }

    /// Label an unclassified failure with a workflow default kind.
    pub fn classify(self, default: ErrorKind) -> Self {
        if self.is_classified() {
            return self;
        }

        match default {
            ErrorKind::PasswordUpdate => {
                let message = match &self {
                    AppError::NotFound => "User cannot be found".to_string(),
                    other => other.user_message(),
                };
                AppError::PasswordUpdate(message)
            }
            ErrorKind::UserCreation => AppError::UserCreation(self.user_message()),
            _ => self,
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::UserCreation(_) | AppError::PasswordUpdate(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::UserCreation(msg) | AppError::PasswordUpdate(msg) => msg.clone(),

            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Violated validation rules, empty for other kinds.
    pub fn violations(&self) -> &[String] {
        match self {
            AppError::Validation(rules) => rules,
            _ => &[],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            kind: self.kind().as_str(),
            message: self.user_message(),
            errors: self.violations().to_vec(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(format_validation_errors(&errors))
    }
}

/// Flatten validation errors into one message per violated rule, sorted by field.
fn format_validation_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut rules: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    rules.sort();
    rules
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(vec![msg.into()])
    }

    pub fn user_creation(msg: impl Into<String>) -> Self {
        AppError::UserCreation(msg.into())
    }

    pub fn password_update(msg: impl Into<String>) -> Self {
        AppError::PasswordUpdate(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_takes_workflow_default() {
        let err = AppError::internal("connection reset").classify(ErrorKind::PasswordUpdate);
        assert_eq!(err.kind(), ErrorKind::PasswordUpdate);

        let err = AppError::NotFound.classify(ErrorKind::PasswordUpdate);
        assert!(matches!(err, AppError::PasswordUpdate(ref m) if m == "User cannot be found"));
    }

    #[test]
    fn test_classified_errors_pass_through() {
        let err = AppError::validation("role is invalid").classify(ErrorKind::PasswordUpdate);
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = AppError::password_update("bad").classify(ErrorKind::Server);
        assert_eq!(err.kind(), ErrorKind::PasswordUpdate);
    }

    #[test]
    fn test_server_default_keeps_error() {
        let err = AppError::internal("boom").classify(ErrorKind::Server);
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.kind().as_str(), "SERVER_ERROR");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_message_hidden() {
        let err = AppError::internal("secret table name");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::password_update("x").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
