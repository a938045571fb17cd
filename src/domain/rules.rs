//! Loan rules: date parsing, fines and form validation.
//!
//! Nothing in here touches storage or reads the clock; callers pass "today".

use chrono::NaiveDate;

use super::errors::ValidationError;
use super::repositories::CatalogChoice;

/// Late fee charged for every whole day past the due date.
pub const FINE_PER_DAY: f64 = 5.0;

/// Display and storage format for loan dates.
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Parse a `MM/DD/YY` date.
///
/// The shape is checked strictly: two digits for each field and `/` as the
/// only separator. Impossible dates such as `06/31/25` are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 8 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }

    let field = |start: usize| -> Option<u32> {
        let (hi, lo) = (bytes[start], bytes[start + 1]);
        if hi.is_ascii_digit() && lo.is_ascii_digit() {
            Some(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
        } else {
            None
        }
    };

    let month = field(0)?;
    let day = field(3)?;
    let yy = field(6)? as i32;
    // POSIX pivot for two-digit years
    let year = if yy < 69 { 2000 + yy } else { 1900 + yy };

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Fine owed for a loan due on `due_date`, as of `today`.
///
/// Strictly date-based: a loan due today owes nothing.
pub fn compute_fine(due_date: NaiveDate, today: NaiveDate) -> f64 {
    match days_overdue(due_date, today) {
        0 => 0.0,
        days_late => days_late as f64 * FINE_PER_DAY,
    }
}

/// Whole days a loan due on `due_date` is late as of `today`.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    if due_date < today {
        (today - due_date).num_days()
    } else {
        0
    }
}

/// Form input that passed every check in [`validate_loan_input`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLoan {
    pub borrower: String,
    pub catalog_id: i32,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Validate the loan form, stopping at the first failure.
///
/// `available` is the list currently offered to the book selector, so a title
/// whose copies ran out is reported as [`ValidationError::UnknownBook`].
pub fn validate_loan_input(
    borrower: &str,
    catalog_title: &str,
    borrow_date_text: &str,
    due_date_text: &str,
    available: &[CatalogChoice],
    today: NaiveDate,
) -> Result<ValidatedLoan, ValidationError> {
    let borrower = borrower.trim();
    if borrower.is_empty() {
        return Err(ValidationError::EmptyBorrower);
    }

    if catalog_title.is_empty() {
        return Err(ValidationError::NoBookSelected);
    }

    let catalog_id = available
        .iter()
        .find(|choice| choice.title == catalog_title)
        .map(|choice| choice.id)
        .ok_or(ValidationError::UnknownBook)?;

    let borrow_date = parse_date(borrow_date_text).ok_or(ValidationError::BadBorrowDateFormat)?;
    let due_date = parse_date(due_date_text).ok_or(ValidationError::BadDueDateFormat)?;

    if borrow_date < today {
        return Err(ValidationError::BorrowDateInPast);
    }

    if due_date < borrow_date {
        return Err(ValidationError::DueBeforeBorrow);
    }

    Ok(ValidatedLoan {
        borrower: borrower.to_string(),
        catalog_id,
        borrow_date,
        due_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> Vec<CatalogChoice> {
        vec![
            CatalogChoice {
                id: 4,
                title: "Database Systems".to_string(),
            },
            CatalogChoice {
                id: 1,
                title: "Introduction to Python".to_string(),
            },
        ]
    }

    #[test]
    fn test_parse_date_accepts_two_digit_fields() {
        assert_eq!(parse_date("06/15/25"), Some(date(2025, 6, 15)));
        assert_eq!(parse_date("12/31/99"), Some(date(1999, 12, 31)));
        assert_eq!(parse_date("01/01/00"), Some(date(2000, 1, 1)));
    }

    #[test]
    fn test_parse_date_rejects_impossible_days() {
        assert_eq!(parse_date("06/31/25"), None);
        assert_eq!(parse_date("02/29/25"), None);
        assert_eq!(parse_date("13/01/25"), None);
        assert_eq!(parse_date("00/10/25"), None);
        assert_eq!(parse_date("02/29/24"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for text in [
            "6/15/25",
            "06/15/2025",
            "2025-06-15",
            "06-15-25",
            " 06/15/25",
            "06/15/25 ",
            "ab/cd/ef",
            "",
        ] {
            assert_eq!(parse_date(text), None, "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_format_date_matches_parse() {
        let d = date(2025, 6, 5);
        assert_eq!(format_date(d), "06/05/25");
        assert_eq!(parse_date(&format_date(d)), Some(d));
    }

    #[test]
    fn test_compute_fine_for_overdue_loans() {
        let today = date(2025, 7, 1);
        assert_eq!(compute_fine(today - Duration::days(1), today), 5.0);
        assert_eq!(compute_fine(date(2025, 6, 20), today), 55.0);
    }

    #[test]
    fn test_compute_fine_is_zero_when_not_overdue() {
        let today = date(2025, 7, 1);
        assert_eq!(compute_fine(today, today), 0.0);
        assert_eq!(compute_fine(today + Duration::days(10), today), 0.0);
        assert_eq!(days_overdue(today, today), 0);
        assert_eq!(days_overdue(date(2025, 6, 28), today), 3);
    }

    #[test]
    fn test_validate_accepts_same_day_borrow() {
        let today = date(2025, 6, 15);
        let loan = validate_loan_input(
            "  Ana  ",
            "Database Systems",
            "06/15/25",
            "06/25/25",
            &catalog(),
            today,
        )
        .expect("valid input");

        assert_eq!(loan.borrower, "Ana");
        assert_eq!(loan.catalog_id, 4);
        assert_eq!(loan.borrow_date, today);
        assert_eq!(loan.due_date, date(2025, 6, 25));
    }

    #[test]
    fn test_validate_reports_first_failure_only() {
        let today = date(2025, 6, 15);
        let books = catalog();

        // Everything is wrong: only the borrower is reported
        assert_eq!(
            validate_loan_input(" ", "", "bad", "bad", &books, today),
            Err(ValidationError::EmptyBorrower)
        );
        assert_eq!(
            validate_loan_input("Ana", "", "bad", "bad", &books, today),
            Err(ValidationError::NoBookSelected)
        );
        assert_eq!(
            validate_loan_input("Ana", "Missing Title", "bad", "bad", &books, today),
            Err(ValidationError::UnknownBook)
        );
        assert_eq!(
            validate_loan_input("Ana", "Database Systems", "6/15/25", "bad", &books, today),
            Err(ValidationError::BadBorrowDateFormat)
        );
        assert_eq!(
            validate_loan_input("Ana", "Database Systems", "06/15/25", "06/31/25", &books, today),
            Err(ValidationError::BadDueDateFormat)
        );
    }

    #[test]
    fn test_validate_checks_date_order() {
        let today = date(2025, 6, 15);
        let books = catalog();

        assert_eq!(
            validate_loan_input("Ana", "Database Systems", "06/14/25", "06/20/25", &books, today),
            Err(ValidationError::BorrowDateInPast)
        );
        assert_eq!(
            validate_loan_input("Ana", "Database Systems", "06/16/25", "06/15/25", &books, today),
            Err(ValidationError::DueBeforeBorrow)
        );
        assert!(
            validate_loan_input("Ana", "Database Systems", "06/16/25", "06/16/25", &books, today)
                .is_ok()
        );
    }
}
