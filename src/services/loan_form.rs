//! Loan form state behind the borrow form.

use chrono::NaiveDate;

use crate::domain::{DateInput, DateInputKind, LoanRow};

/// Field values of the borrow form.
///
/// Dates go through [`DateInput`] so the form works the same whether they are
/// typed or picked from a calendar.
pub struct LoanForm {
    pub borrower: String,
    /// Selected catalog title, empty when nothing is selected
    pub book: String,
    pub borrow_date: Box<dyn DateInput>,
    pub due_date: Box<dyn DateInput>,
}

impl LoanForm {
    pub fn new(kind: DateInputKind, today: NaiveDate) -> Self {
        Self {
            borrower: String::new(),
            book: String::new(),
            borrow_date: kind.build(today),
            due_date: kind.build(today),
        }
    }

    /// Blank borrower and book, both dates back to today
    pub fn reset(&mut self, today: NaiveDate) {
        self.borrower.clear();
        self.book.clear();
        self.borrow_date.set_date(today);
        self.due_date.set_date(today);
    }

    /// Copy a table row into the form as a starting point for a new loan
    pub fn fill_from(&mut self, row: &LoanRow) {
        self.borrower = row.borrower.clone();
        self.book = row.title.clone();
        self.borrow_date.set_date(row.borrow_date);
        self.due_date.set_date(row.due_date);
    }
}

impl std::fmt::Debug for LoanForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoanForm")
            .field("borrower", &self.borrower)
            .field("book", &self.book)
            .field("borrow_date", &self.borrow_date.text())
            .field("due_date", &self.due_date.text())
            .finish()
    }
}
