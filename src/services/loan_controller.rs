//! Loan Controller - the five borrow-form actions, without any UI
//!
//! Every action returns an explicit result; turning it into a dialog or a
//! console line is the caller's job.

use chrono::{Local, NaiveDate};
use std::fmt;

use crate::domain::{
    compute_fine, validate_loan_input, CatalogChoice, DateInputKind, DomainError, LoanRow,
    LoanStore, NewLoan, ValidationError,
};
use crate::services::loan_form::LoanForm;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Action that hit a storage failure, used to word the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
    Search,
    Refresh,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Add => "adding",
            Action::Delete => "deleting",
            Action::Search => "searching",
            Action::Refresh => "loading",
        }
    }
}

/// Why an action was refused or failed
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// Form input rejected before touching the store
    Validation(ValidationError),
    /// Delete pressed with no row selected
    NoSelection,
    /// Selected loan id is not in the current table
    UnknownRow(i32),
    /// The loan's catalog entry no longer exists
    BookNotFound,
    /// Unexpected storage failure
    Storage { action: Action, cause: DomainError },
}

impl ActionError {
    /// Warnings are shown differently from errors but abort the action all the same
    pub fn is_warning(&self) -> bool {
        matches!(self, ActionError::NoSelection)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation(e) => write!(f, "{}", e),
            ActionError::NoSelection => write!(f, "Please select a record to delete"),
            ActionError::UnknownRow(id) => write!(f, "Record {} is not in the table", id),
            ActionError::BookNotFound => write!(f, "Book not found"),
            ActionError::Storage { action, cause } => {
                write!(f, "Error {} record: {}", action.verb(), cause)
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl From<ValidationError> for ActionError {
    fn from(e: ValidationError) -> Self {
        ActionError::Validation(e)
    }
}

fn storage(action: Action) -> impl FnOnce(DomainError) -> ActionError {
    move |cause| {
        tracing::error!("Error {} record: {}", action.verb(), cause);
        ActionError::Storage { action, cause }
    }
}

/// Outcome of an action that went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoanAdded { id: i32 },
    LoanDeleted { id: i32 },
    /// The user declined the delete confirmation
    Cancelled,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoanAdded { .. } => write!(f, "Book borrowed successfully!"),
            Notice::LoanDeleted { .. } => write!(f, "Record deleted successfully!"),
            Notice::Cancelled => write!(f, "Nothing deleted"),
        }
    }
}

/// Drives the borrow form against a [`LoanStore`] and keeps the state the
/// presentation renders: selectable titles, loan rows, form and selection.
pub struct LoanController<S: LoanStore> {
    store: S,
    form: LoanForm,
    catalog: Vec<CatalogChoice>,
    loans: Vec<LoanRow>,
    search: String,
    selected: Option<i32>,
}

impl<S: LoanStore> LoanController<S> {
    /// Take ownership of the store and load the initial lists
    pub async fn new(store: S, date_input: DateInputKind) -> Result<Self, ActionError> {
        let mut controller = Self {
            store,
            form: LoanForm::new(date_input, today()),
            catalog: Vec::new(),
            loans: Vec::new(),
            search: String::new(),
            selected: None,
        };
        controller.refresh().await?;
        Ok(controller)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand the store back for shutdown
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn form(&self) -> &LoanForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LoanForm {
        &mut self.form
    }

    /// Titles offered by the book selector
    pub fn available_catalog(&self) -> &[CatalogChoice] {
        &self.catalog
    }

    /// Rows currently shown in the table
    pub fn loans(&self) -> &[LoanRow] {
        &self.loans
    }

    pub fn record_count(&self) -> usize {
        self.loans.len()
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn selected(&self) -> Option<&LoanRow> {
        let id = self.selected?;
        self.loans.iter().find(|row| row.id == id)
    }

    /// Reload both lists from the store
    pub async fn refresh(&mut self) -> Result<(), ActionError> {
        self.refresh_catalog().await.map_err(storage(Action::Refresh))?;
        self.refresh_loans().await.map_err(storage(Action::Refresh))?;
        Ok(())
    }

    async fn refresh_catalog(&mut self) -> Result<(), DomainError> {
        self.catalog = self.store.list_available_catalog().await?;

        // The selector falls back to the first available title
        self.form.book = self
            .catalog
            .first()
            .map(|choice| choice.title.clone())
            .unwrap_or_default();
        Ok(())
    }

    async fn refresh_loans(&mut self) -> Result<(), DomainError> {
        let filter = Some(self.search.as_str()).filter(|text| !text.is_empty());
        self.loans = self.store.list_loans(filter).await?;

        if self.selected().is_none() {
            self.selected = None;
        }
        Ok(())
    }

    /// Validate the form and record a loan
    pub async fn add_loan(&mut self) -> Result<Notice, ActionError> {
        let loan = validate_loan_input(
            &self.form.borrower,
            &self.form.book,
            &self.form.borrow_date.text(),
            &self.form.due_date.text(),
            &self.catalog,
            today(),
        )
        .inspect_err(|e| tracing::debug!("Loan form rejected: {:?}", e))?;

        let fine = compute_fine(loan.due_date, today());

        let id = match self
            .store
            .insert_loan(NewLoan {
                borrower: loan.borrower,
                catalog_id: loan.catalog_id,
                borrow_date: loan.borrow_date,
                due_date: loan.due_date,
                fine,
            })
            .await
        {
            Ok(id) => id,
            Err(DomainError::Reference(msg)) => {
                tracing::warn!("Cannot add loan: {}", msg);
                return Err(ActionError::BookNotFound);
            }
            Err(cause) => return Err(storage(Action::Add)(cause)),
        };

        self.refresh_catalog().await.map_err(storage(Action::Add))?;
        self.refresh_loans().await.map_err(storage(Action::Add))?;
        self.clear_form();

        Ok(Notice::LoanAdded { id })
    }

    /// Delete the selected loan once `confirm` agrees
    pub async fn delete_loan<F>(&mut self, confirm: F) -> Result<Notice, ActionError>
    where
        F: FnOnce(&LoanRow) -> bool,
    {
        let row = self.selected().cloned().ok_or(ActionError::NoSelection)?;

        if !confirm(&row) {
            return Ok(Notice::Cancelled);
        }

        match self.store.delete_loan(row.id).await {
            Ok(()) => {}
            Err(DomainError::Reference(msg)) => {
                tracing::warn!("Cannot delete loan {}: {}", row.id, msg);
                return Err(ActionError::BookNotFound);
            }
            Err(cause) => return Err(storage(Action::Delete)(cause)),
        }

        self.selected = None;
        self.refresh_catalog().await.map_err(storage(Action::Delete))?;
        self.refresh_loans().await.map_err(storage(Action::Delete))?;

        Ok(Notice::LoanDeleted { id: row.id })
    }

    /// Replace the filter and reload the table; returns the visible count
    pub async fn search(&mut self, text: &str) -> Result<usize, ActionError> {
        self.search = text.to_string();
        self.refresh_loans().await.map_err(storage(Action::Search))?;
        Ok(self.loans.len())
    }

    /// Select a row and copy it into the form
    pub fn select_row(&mut self, loan_id: i32) -> Result<&LoanRow, ActionError> {
        let row = self
            .loans
            .iter()
            .find(|row| row.id == loan_id)
            .ok_or(ActionError::UnknownRow(loan_id))?;

        self.form.fill_from(row);
        self.selected = Some(loan_id);
        Ok(row)
    }

    /// Blank the form, dates to today, no selection
    pub fn clear_form(&mut self) {
        self.form.reset(today());
        self.selected = None;
    }
}
