//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Lookups that find nothing are not errors: repositories return `Option`
//! or `bool` for those.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Malformed input (field constraints, pagination bounds)
    Validation(String),
    /// A write references a row that does not exist, or duplicates a key
    ConstraintViolation(String),
    /// A multi-row write failed and was rolled back
    TransactionFailure(String),
    /// Database/persistence error
    Database(String),
}

impl DomainError {
    /// True for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::ConstraintViolation(_)
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::TransactionFailure(msg) => write!(f, "Write failed: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg))
            | Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                DomainError::ConstraintViolation(msg)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
