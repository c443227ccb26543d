//! Shared setup for database integration tests.

#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tally_core::budget::{BudgetRecord, BudgetType};
use tally_db::migration::{Migrator, MigratorTrait};
use tally_shared::types::AuthorId;

/// Fresh in-memory database with all migrations applied.
///
/// The pool holds exactly one connection: every SQLite in-memory connection
/// is its own database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Builds an income record.
pub fn income(year: i32, month: i32, amount: i32, author_id: Option<AuthorId>) -> BudgetRecord {
    BudgetRecord {
        year,
        month,
        amount,
        budget_type: BudgetType::Income,
        author_id,
    }
}

/// Builds an expense record.
pub fn expense(year: i32, month: i32, amount: i32, author_id: Option<AuthorId>) -> BudgetRecord {
    BudgetRecord {
        year,
        month,
        amount,
        budget_type: BudgetType::Expense,
        author_id,
    }
}
