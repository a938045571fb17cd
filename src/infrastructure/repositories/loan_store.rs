//! SeaORM implementation of LoanStore

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::domain::rules::format_date;
use crate::domain::{CatalogChoice, CatalogEntry, DomainError, LoanRow, LoanStore, NewLoan};
use crate::models::book::{self, Entity as BookEntity};
use crate::models::loan::{self, Entity as LoanEntity, LoanWithTitle};

/// SeaORM-based store owning the application's single connection
pub struct SeaOrmLoanStore {
    db: DatabaseConnection,
}

impl SeaOrmLoanStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Release the connection; called once on shutdown.
    pub async fn close(self) -> Result<(), DbErr> {
        self.db.close().await
    }
}

/// Case-insensitive substring match on borrower or title.
///
/// Folded in Rust rather than with SQLite `LOWER()`, which only knows ASCII.
fn matches_filter(row: &LoanWithTitle, needle: &str) -> bool {
    row.student_name.to_lowercase().contains(needle) || row.title.to_lowercase().contains(needle)
}

#[async_trait]
impl LoanStore for SeaOrmLoanStore {
    async fn list_available_catalog(&self) -> Result<Vec<CatalogChoice>, DomainError> {
        let books = BookEntity::find()
            .filter(book::Column::Quantity.gt(0))
            .order_by_asc(book::Column::Title)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(CatalogChoice::from).collect())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(book::Column::Title)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(CatalogEntry::from).collect())
    }

    async fn find_catalog_entry(&self, id: i32) -> Result<Option<CatalogEntry>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;
        Ok(book.map(CatalogEntry::from))
    }

    async fn list_loans(&self, filter: Option<&str>) -> Result<Vec<LoanRow>, DomainError> {
        let rows = LoanEntity::find()
            .select_only()
            .column(loan::Column::Id)
            .column(loan::Column::StudentName)
            .column(loan::Column::BookId)
            .column_as(book::Column::Title, "title")
            .column(loan::Column::BorrowDate)
            .column(loan::Column::DueDate)
            .column(loan::Column::Fine)
            .join(JoinType::InnerJoin, loan::Relation::Book.def())
            .order_by_asc(loan::Column::Id)
            .into_model::<LoanWithTitle>()
            .all(&self.db)
            .await?;

        let rows: Vec<LoanWithTitle> = match filter.filter(|t| !t.is_empty()) {
            Some(text) => {
                let needle = text.to_lowercase();
                rows.into_iter()
                    .filter(|row| matches_filter(row, &needle))
                    .collect()
            }
            None => rows,
        };

        tracing::debug!("Loaded {} loan rows (filter: {:?})", rows.len(), filter);

        rows.into_iter().map(LoanRow::try_from).collect()
    }

    async fn insert_loan(&self, new_loan: NewLoan) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        if BookEntity::find_by_id(new_loan.catalog_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(DomainError::Reference(format!(
                "book {} does not exist",
                new_loan.catalog_id
            )));
        }

        // Conditional decrement keeps the quantity from going negative
        let taken = BookEntity::update_many()
            .col_expr(
                book::Column::Quantity,
                Expr::col(book::Column::Quantity).sub(1),
            )
            .filter(book::Column::Id.eq(new_loan.catalog_id))
            .filter(book::Column::Quantity.gt(0))
            .exec(&txn)
            .await?;

        if taken.rows_affected == 0 {
            return Err(DomainError::Validation(format!(
                "no copies of book {} left",
                new_loan.catalog_id
            )));
        }

        let saved = loan::ActiveModel {
            student_name: Set(new_loan.borrower),
            book_id: Set(new_loan.catalog_id),
            borrow_date: Set(format_date(new_loan.borrow_date)),
            due_date: Set(format_date(new_loan.due_date)),
            fine: Set(new_loan.fine),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(
            "Loan {} created for {:?} on book {}",
            saved.id,
            saved.student_name,
            saved.book_id
        );
        Ok(saved.id)
    }

    async fn delete_loan(&self, loan_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let existing = LoanEntity::find_by_id(loan_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        let returned = BookEntity::update_many()
            .col_expr(
                book::Column::Quantity,
                Expr::col(book::Column::Quantity).add(1),
            )
            .filter(book::Column::Id.eq(existing.book_id))
            .exec(&txn)
            .await?;

        if returned.rows_affected == 0 {
            return Err(DomainError::Reference(format!(
                "book {} for loan {} does not exist",
                existing.book_id, loan_id
            )));
        }

        LoanEntity::delete_by_id(loan_id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Loan {} deleted, copy of book {} returned",
            loan_id,
            existing.book_id
        );
        Ok(())
    }
}

