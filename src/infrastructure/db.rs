use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

use super::seed;

/// Open the database and rebuild it from the sample data.
///
/// Nothing survives between runs: both tables are dropped, recreated and
/// seeded every time.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    reset_schema(&db).await?;
    seed::seed_sample_data(&db).await?;

    tracing::info!("Database ready at {}", database_url);
    Ok(db)
}

async fn reset_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Loans reference books, so they go first
    for table in ["borrowed_books", "books"] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            format!("DROP TABLE IF EXISTS {}", table),
        ))
        .await?;
    }

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 0)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE borrowed_books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_name TEXT NOT NULL,
            book_id INTEGER NOT NULL,
            borrow_date TEXT NOT NULL,
            due_date TEXT NOT NULL,
            fine REAL NOT NULL DEFAULT 0,
            FOREIGN KEY (book_id) REFERENCES books(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_borrowed_books_book_id ON borrowed_books(book_id)"
            .to_owned(),
    ))
    .await?;

    Ok(())
}
