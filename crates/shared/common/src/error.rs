//! Unified error handling for the blog services.
//!
//! Client-correctable errors keep their message; infrastructure errors are
//! logged and replaced by an opaque message before they reach a caller.

use domain::{DomainError, ValidationError};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Infrastructure
    #[error("Password hashing failed")]
    Hashing(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Persistence(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::Hashing(_) => "HASHING_ERROR",
            #[cfg(feature = "database")]
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),

            AppError::Hashing(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Persistence(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// True when the store rejected a write because a unique column collided.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Persistence(e) => matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ),
            _ => false,
        }
    }

    /// True when the store rejected a write because a referenced row is missing.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Persistence(e) => matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))
            ),
            _ => false,
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(err) => AppError::Validation(err),
            DomainError::Hashing(msg) => AppError::Hashing(msg),
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Field;

    #[test]
    fn test_validation_message_is_kept() {
        let err = AppError::from(ValidationError::required(Field::Nickname));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "required nickname");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::from(DomainError::hashing("salt too short"));
        assert_eq!(err.code(), "HASHING_ERROR");
        assert!(!err.user_message().contains("salt"));
    }

    #[test]
    fn test_domain_error_conversion() {
        assert!(matches!(
            AppError::from(DomainError::InvalidCredentials),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            AppError::from(DomainError::hashing("boom")),
            AppError::Hashing(_)
        ));
    }

    #[test]
    fn test_ok_or_not_found() {
        assert!(matches!(
            None::<i32>.ok_or_not_found(),
            Err(AppError::NotFound)
        ));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }

    #[test]
    fn test_credentials_message_is_generic() {
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid credentials"
        );
    }
}
