//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Validation error with message
    Validation(String),
    /// A loan points at a catalog entry that does not exist
    Reference(String),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Reference(msg) => write!(f, "Missing reference: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// Reasons a loan form is rejected before anything touches the store.
///
/// Checked in declaration order; only the first failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBorrower,
    NoBookSelected,
    UnknownBook,
    BadBorrowDateFormat,
    BadDueDateFormat,
    BorrowDateInPast,
    DueBeforeBorrow,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::EmptyBorrower => "Please enter student name",
            ValidationError::NoBookSelected => "Please select a book",
            ValidationError::UnknownBook => "Invalid book selection",
            ValidationError::BadBorrowDateFormat => "Invalid borrow date format. Use MM/DD/YY",
            ValidationError::BadDueDateFormat => "Invalid return date format. Use MM/DD/YY",
            ValidationError::BorrowDateInPast => "Borrow date cannot be in the past",
            ValidationError::DueBeforeBorrow => "Return date cannot be before borrow date",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}
