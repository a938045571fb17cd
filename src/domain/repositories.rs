//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::DomainError;

/// A title offered by the book selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogChoice {
    pub id: i32,
    pub title: String,
}

/// Catalog entry with its remaining lendable copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub title: String,
    pub quantity: i32,
}

/// Loan joined with the title of the book it references
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanRow {
    pub id: i32,
    pub borrower: String,
    pub book_id: i32,
    pub title: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub fine: f64,
}

impl LoanRow {
    /// Rows carrying a fine are flagged in the table
    pub fn is_overdue(&self) -> bool {
        self.fine > 0.0
    }
}

/// Input for creating a loan
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub borrower: String,
    pub catalog_id: i32,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub fine: f64,
}

/// Repository trait for catalog entries and the loans against them
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Titles with at least one copy left, ordered by title
    async fn list_available_catalog(&self) -> Result<Vec<CatalogChoice>, DomainError>;

    /// Every catalog entry, including exhausted ones, ordered by title
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, DomainError>;

    /// Find a catalog entry by ID
    async fn find_catalog_entry(&self, id: i32) -> Result<Option<CatalogEntry>, DomainError>;

    /// Loans ordered by ID, optionally restricted to rows whose borrower or
    /// title contains `filter` (case-insensitive)
    async fn list_loans(&self, filter: Option<&str>) -> Result<Vec<LoanRow>, DomainError>;

    /// Record a loan and take one copy off the shelf
    async fn insert_loan(&self, loan: NewLoan) -> Result<i32, DomainError>;

    /// Remove a loan and put its copy back on the shelf
    async fn delete_loan(&self, loan_id: i32) -> Result<(), DomainError>;
}
