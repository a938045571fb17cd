//! Domain layer - Pure business abstractions
//!
//! This layer contains NO storage code. Only rules, trait definitions and
//! domain error types; SeaORM appears solely in the `DbErr` conversion.

pub mod date_input;
pub mod errors;
pub mod repositories;
pub mod rules;

pub use date_input::{CalendarDatePicker, DateInput, DateInputKind, TextDateField};
pub use errors::{DomainError, ValidationError};
pub use repositories::*;
pub use rules::{compute_fine, format_date, parse_date, validate_loan_input, ValidatedLoan};
