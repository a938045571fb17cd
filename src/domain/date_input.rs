//! Date input capability used by the loan form.
//!
//! The form holds two of these (borrow and due date). Whether the user types
//! the date or picks it from a calendar, the controller only sees `DateInput`.

use chrono::NaiveDate;

use super::rules::{format_date, parse_date};

pub trait DateInput: Send + Sync {
    /// Current value as `MM/DD/YY` text, possibly malformed.
    fn text(&self) -> String;

    /// Replace the value from text, as when re-populating the form from a row.
    fn set_text(&mut self, text: &str);

    fn set_date(&mut self, date: NaiveDate);
}

/// Which date widget the form is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateInputKind {
    #[default]
    Text,
    Calendar,
}

impl DateInputKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(DateInputKind::Text),
            "calendar" => Some(DateInputKind::Calendar),
            _ => None,
        }
    }

    /// Build an input of this kind showing `today`.
    pub fn build(self, today: NaiveDate) -> Box<dyn DateInput> {
        match self {
            DateInputKind::Text => Box::new(TextDateField::new(today)),
            DateInputKind::Calendar => Box::new(CalendarDatePicker::new(today)),
        }
    }
}

/// Free-text entry; keeps whatever the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDateField {
    text: String,
}

impl TextDateField {
    pub fn new(initial: NaiveDate) -> Self {
        Self {
            text: format_date(initial),
        }
    }
}

impl DateInput for TextDateField {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.text = format_date(date);
    }
}

/// Calendar-backed picker; always holds a real date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDatePicker {
    date: NaiveDate,
}

impl CalendarDatePicker {
    pub fn new(initial: NaiveDate) -> Self {
        Self { date: initial }
    }
}

impl DateInput for CalendarDatePicker {
    fn text(&self) -> String {
        format_date(self.date)
    }

    fn set_text(&mut self, text: &str) {
        // A picker cannot show an invalid date; keep the current one
        if let Some(date) = parse_date(text) {
            self.date = date;
        } else {
            tracing::debug!("Calendar picker ignored unparseable date {:?}", text);
        }
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }
}
