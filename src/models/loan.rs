use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;
use serde::Serialize;

use crate::domain::{DomainError, LoanRow};
use crate::domain::rules::parse_date;

/// One copy lent to a student. Dates are stored as `MM/DD/YY` text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "borrowed_books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_name: String,
    pub book_id: i32,
    pub borrow_date: String,
    pub due_date: String,
    pub fine: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Raw shape of the loan table query (loan joined with the book title)
#[derive(Debug, Clone, FromQueryResult)]
pub struct LoanWithTitle {
    pub id: i32,
    pub student_name: String,
    pub book_id: i32,
    pub title: String,
    pub borrow_date: String,
    pub due_date: String,
    pub fine: f64,
}

impl TryFrom<LoanWithTitle> for LoanRow {
    type Error = DomainError;

    fn try_from(row: LoanWithTitle) -> Result<Self, Self::Error> {
        let bad_date = |text: &str| {
            DomainError::Internal(format!("loan {} has unreadable date {:?}", row.id, text))
        };

        let borrow_date = parse_date(&row.borrow_date).ok_or_else(|| bad_date(&row.borrow_date))?;
        let due_date = parse_date(&row.due_date).ok_or_else(|| bad_date(&row.due_date))?;

        Ok(Self {
            id: row.id,
            borrower: row.student_name,
            book_id: row.book_id,
            title: row.title,
            borrow_date,
            due_date,
            fine: row.fine,
        })
    }
}
