use sea_orm::*;

use crate::models::{book, loan};

/// Titles on the shelf at startup, with their copy counts
pub const SAMPLE_BOOKS: [(&str, i32); 5] = [
    ("Introduction to Python", 3),
    ("Data Structures and Algorithms", 2),
    ("Machine Learning Fundamentals", 4),
    ("Database Systems", 1),
    ("Web Development with Django", 2),
];

/// Loans present at startup: (student, book id, borrowed, due, fine)
pub const SAMPLE_LOANS: [(&str, i32, &str, &str, f64); 3] = [
    ("John Smith", 1, "06/15/25", "06/25/25", 0.0),
    ("Emma Wilson", 2, "06/18/25", "06/28/25", 0.0),
    ("Michael Brown", 3, "06/10/25", "06/20/25", 25.0),
];

/// Insert the fixed sample dataset into freshly created tables.
///
/// Quantities are stored as listed; the sample loans do not adjust them.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    let books = SAMPLE_BOOKS.iter().map(|(title, quantity)| book::ActiveModel {
        title: Set((*title).to_owned()),
        quantity: Set(*quantity),
        ..Default::default()
    });
    book::Entity::insert_many(books).exec(&txn).await?;

    let loans = SAMPLE_LOANS
        .iter()
        .map(|(student, book_id, borrowed, due, fine)| loan::ActiveModel {
            student_name: Set((*student).to_owned()),
            book_id: Set(*book_id),
            borrow_date: Set((*borrowed).to_owned()),
            due_date: Set((*due).to_owned()),
            fine: Set(*fine),
            ..Default::default()
        });
    loan::Entity::insert_many(loans).exec(&txn).await?;

    txn.commit().await?;

    tracing::debug!(
        "Seeded {} books and {} loans",
        SAMPLE_BOOKS.len(),
        SAMPLE_LOANS.len()
    );
    Ok(())
}
