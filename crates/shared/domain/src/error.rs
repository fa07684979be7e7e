//! Domain-level errors.
//!
//! These errors represent input rule violations and credential failures.
//! They are independent of infrastructure concerns (database, transport).

use std::fmt;

use thiserror::Error;

/// Input field a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nickname,
    Email,
    Password,
    Title,
    Content,
    Author,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Nickname => "nickname",
            Field::Email => "email",
            Field::Password => "password",
            Field::Title => "title",
            Field::Content => "content",
            Field::Author => "author",
        };
        f.write_str(name)
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Field was empty or missing
    Required,
    /// Field was present but malformed
    Invalid,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Required => f.write_str("required"),
            Problem::Invalid => f.write_str("invalid"),
        }
    }
}

/// A single failed validation rule, e.g. "required nickname".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{problem} {field}")]
pub struct ValidationError {
    pub field: Field,
    pub problem: Problem,
}

impl ValidationError {
    pub fn required(field: Field) -> Self {
        Self {
            field,
            problem: Problem::Required,
        }
    }

    pub fn invalid(field: Field) -> Self {
        Self {
            field,
            problem: Problem::Invalid,
        }
    }
}

/// Domain-specific errors.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Input failed a validation rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The password hashing primitive rejected its input
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Credential mismatch (wrong password, unknown account or corrupt hash)
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl DomainError {
    /// Create a hashing error
    pub fn hashing(msg: impl Into<String>) -> Self {
        DomainError::Hashing(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        assert_eq!(
            ValidationError::required(Field::Nickname).to_string(),
            "required nickname"
        );
        assert_eq!(
            ValidationError::invalid(Field::Email).to_string(),
            "invalid email"
        );
    }

    #[test]
    fn test_validation_converts_to_domain_error() {
        let err: DomainError = ValidationError::required(Field::Password).into();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError {
                field: Field::Password,
                problem: Problem::Required,
            })
        ));
    }
}
