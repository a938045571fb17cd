//! Line-oriented front end for the loan controller.
//!
//! Reads one command per line, forwards it to [`LoanController`] and prints
//! the catalog, the loan table and any message as plain text.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};

use crate::domain::rules::{days_overdue, format_date};
use crate::domain::{CatalogChoice, CatalogEntry, LoanRow, LoanStore};
use crate::services::{LoanController, LoanForm};

pub const HELP: &str = "\
Commands:
  name <text>        set the student name
  book <title>       select a book
  borrow <MM/DD/YY>  set the borrow date
  due <MM/DD/YY>     set the return date
  add                borrow the book
  select <id>        select a record and copy it into the form
  delete             delete the selected record
  search [text]      filter records by student or title
  clear              reset the form
  list               show books and records
  stock              show every title with its copies left
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Book(String),
    Borrow(String),
    Due(String),
    Add,
    Select(i32),
    Delete,
    Search(String),
    Clear,
    List,
    Stock,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "name" => Command::Name(rest.to_string()),
            "book" => Command::Book(rest.to_string()),
            "borrow" => Command::Borrow(rest.to_string()),
            "due" => Command::Due(rest.to_string()),
            "add" => Command::Add,
            "select" => {
                let id = rest
                    .parse()
                    .map_err(|_| format!("Expected a record id, got {:?}", rest))?;
                Command::Select(id)
            }
            "delete" => Command::Delete,
            "search" => Command::Search(rest.to_string()),
            "clear" => Command::Clear,
            "list" => Command::List,
            "stock" => Command::Stock,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("Type a command, or help".to_string()),
            other => return Err(format!("Unknown command {:?}, try help", other)),
        };
        Ok(command)
    }
}

pub fn render_catalog(choices: &[CatalogChoice]) -> String {
    if choices.is_empty() {
        return "Books: (none available)\n".to_string();
    }
    let titles: Vec<&str> = choices.iter().map(|c| c.title.as_str()).collect();
    format!("Books: {}\n", titles.join(" | "))
}

pub fn render_stock(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{:>3}  {:<34} {}", entry.id, entry.title, entry.quantity);
    }
    out
}

/// Loan table; rows with a fine are marked `!` with the days overdue.
pub fn render_loans(rows: &[LoanRow], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:>3}  {:<18} {:<32} {:<8} {:<8} {:>8}",
        "ID", "Student", "Book", "Borrow", "Return", "Fine (R)"
    );
    for row in rows {
        let flag = if row.is_overdue() { '!' } else { ' ' };
        let _ = write!(
            out,
            "{} {:>3}  {:<18} {:<32} {:<8} {:<8} {:>8.2}",
            flag,
            row.id,
            row.borrower,
            row.title,
            format_date(row.borrow_date),
            format_date(row.due_date),
            row.fine
        );
        let days = days_overdue(row.due_date, today);
        if row.is_overdue() && days > 0 {
            let _ = write!(out, "  ({} days late)", days);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Records: {}", rows.len());
    out
}

pub fn render_form(form: &LoanForm) -> String {
    format!(
        "Student: {:?}  Book: {:?}  Borrow: {}  Return: {}\n",
        form.borrower,
        form.book,
        form.borrow_date.text(),
        form.due_date.text()
    )
}

fn render_view<S: LoanStore>(controller: &LoanController<S>) -> String {
    let today = Local::now().date_naive();
    let mut out = render_catalog(controller.available_catalog());
    out.push_str(&render_loans(controller.loans(), today));
    out.push_str(&render_form(controller.form()));
    out
}

/// Ask before deleting `row`; anything but yes declines.
fn confirm_delete<R: BufRead, W: Write>(
    row: &LoanRow,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(
        output,
        "Delete record {} ({} - {})? [y/N] ",
        row.id, row.borrower, row.title
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Run commands from `input` until `quit` or end of input.
pub async fn run<S, R, W>(
    controller: &mut LoanController<S>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    S: LoanStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "Library Management System")?;
    write!(output, "{}", render_view(controller))?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(output, "{}", msg)?;
                continue;
            }
        };

        match command {
            Command::Name(name) => controller.form_mut().borrower = name,
            Command::Book(title) => controller.form_mut().book = title,
            Command::Borrow(text) => controller.form_mut().borrow_date.set_text(&text),
            Command::Due(text) => controller.form_mut().due_date.set_text(&text),
            Command::Add => match controller.add_loan().await {
                Ok(notice) => {
                    writeln!(output, "Success: {}", notice)?;
                    write!(output, "{}", render_view(controller))?;
                }
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Command::Select(id) => {
                let selected = controller.select_row(id).map(|_| ());
                match selected {
                    Ok(()) => write!(output, "{}", render_form(controller.form()))?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            Command::Delete => {
                let mut prompt_error = None;
                let result = controller
                    .delete_loan(|row| {
                        confirm_delete(row, input, output).unwrap_or_else(|e| {
                            prompt_error = Some(e);
                            false
                        })
                    })
                    .await;
                if let Some(e) = prompt_error {
                    return Err(e);
                }
                match result {
                    Ok(notice) => {
                        writeln!(output, "{}", notice)?;
                        write!(output, "{}", render_view(controller))?;
                    }
                    Err(e) if e.is_warning() => writeln!(output, "Warning: {}", e)?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            Command::Search(text) => match controller.search(&text).await {
                Ok(_) => write!(
                    output,
                    "{}",
                    render_loans(controller.loans(), Local::now().date_naive())
                )?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Command::Clear => {
                controller.clear_form();
                write!(output, "{}", render_form(controller.form()))?;
            }
            Command::List => write!(output, "{}", render_view(controller))?,
            Command::Stock => match controller.store().list_catalog().await {
                Ok(entries) => write!(output, "{}", render_stock(&entries))?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            },
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
