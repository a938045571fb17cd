//! Services Layer
//!
//! Application logic between the store and whatever renders it. Nothing here
//! knows about widgets or terminals.

pub mod loan_controller;
pub mod loan_form;

// Re-export for convenience
pub use loan_controller::{Action, ActionError, LoanController, Notice};
pub use loan_form::LoanForm;
