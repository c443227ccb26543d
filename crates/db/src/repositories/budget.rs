//! Budget store: record insertion and consistent per-year snapshots.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend,
    DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
    sea_query::Expr,
};
use tally_core::author::Author;
use tally_core::budget::{
    AuthorNameFilter, BudgetError, BudgetRecord, BudgetYearStats, StatsAggregator, StoredBudgetRecord,
    YearStatsQuery, validate_record,
};
use tally_shared::types::{AuthorId, BudgetRecordId};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::author::AuthorRepository;
use crate::entities::budget;

/// Error types for budget store operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetStoreError {
    /// The record failed validation.
    #[error(transparent)]
    Invalid(#[from] BudgetError),

    /// The record references an author that does not exist.
    #[error("Author not found: {0}")]
    UnknownAuthor(AuthorId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl BudgetStoreError {
    /// Classifies an insert failure. A foreign key violation means the
    /// author was deleted between the existence check and the insert.
    fn from_insert(err: DbErr, author_id: Option<AuthorId>) -> Self {
        match (err.sql_err(), author_id) {
            (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => Self::UnknownAuthor(id),
            _ => Self::Database(err),
        }
    }
}

impl From<budget::Model> for StoredBudgetRecord {
    fn from(model: budget::Model) -> Self {
        Self {
            id: BudgetRecordId::from_uuid(model.id),
            year: model.year,
            month: model.month,
            amount: model.amount,
            budget_type: model.budget_type.into(),
            author_id: model.author_id.map(AuthorId::from_uuid),
        }
    }
}

/// Every record of one year plus the authors they reference, read from a
/// single transaction.
#[derive(Debug, Clone, Default)]
pub struct YearSnapshot {
    /// Records whose `year` matches.
    pub records: Vec<StoredBudgetRecord>,
    /// Referenced authors that still exist.
    pub authors: HashMap<AuthorId, Author>,
}

impl YearSnapshot {
    /// Author references that did not resolve.
    #[must_use]
    pub fn dangling_authors(&self) -> BTreeSet<AuthorId> {
        self.records
            .iter()
            .filter_map(|r| r.author_id)
            .filter(|id| !self.authors.contains_key(id))
            .collect()
    }
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a record under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The month is outside `1..=12`
    /// - The referenced author does not exist
    /// - Database operation fails
    pub async fn add(&self, candidate: BudgetRecord) -> Result<StoredBudgetRecord, BudgetStoreError> {
        let valid = validate_record(candidate)?;
        let record = StoredBudgetRecord::from_valid(BudgetRecordId::new(), valid);

        let txn = self.db.begin().await?;

        if let Some(author_id) = record.author_id {
            let known = AuthorRepository::find_many(&txn, &BTreeSet::from([author_id])).await?;
            if known.is_empty() {
                return Err(BudgetStoreError::UnknownAuthor(author_id));
            }
        }

        budget::ActiveModel {
            id: Set(record.id.into_inner()),
            year: Set(record.year),
            month: Set(record.month),
            amount: Set(record.amount),
            budget_type: Set(record.budget_type.into()),
            author_id: Set(record.author_id.map(AuthorId::into_inner)),
        }
        .insert(&txn)
        .await
        .map_err(|e| BudgetStoreError::from_insert(e, record.author_id))?;

        txn.commit().await?;

        info!(
            record_id = %record.id,
            year = record.year,
            month = record.month,
            budget_type = %record.budget_type,
            "Budget record added"
        );
        Ok(record)
    }

    /// Reads every record of `year` and the authors they reference inside
    /// one read-only transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn year_snapshot(&self, year: i32) -> Result<YearSnapshot, DbErr> {
        // SQLite transactions are already serializable
        let (isolation, access) = if self.db.get_database_backend() == DbBackend::Sqlite {
            (None, None)
        } else {
            (
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
        };
        let txn = self.db.begin_with_config(isolation, access).await?;

        let records: Vec<StoredBudgetRecord> = budget::Entity::find()
            .filter(budget::Column::Year.eq(year))
            .order_by_asc(budget::Column::Month)
            .order_by_desc(budget::Column::Amount)
            .order_by_asc(budget::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .map(StoredBudgetRecord::from)
            .collect();

        let author_ids: BTreeSet<AuthorId> = records.iter().filter_map(|r| r.author_id).collect();
        let authors = AuthorRepository::find_many(&txn, &author_ids).await?;

        txn.commit().await?;

        let snapshot = YearSnapshot { records, authors };
        for author_id in snapshot.dangling_authors() {
            warn!(%author_id, year, "Budget record references a missing author");
        }
        Ok(snapshot)
    }

    /// Computes yearly statistics from one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn year_stats(&self, query: &YearStatsQuery) -> Result<BudgetYearStats, DbErr> {
        let snapshot = self.year_snapshot(query.year).await?;
        let stats = StatsAggregator::compute(query, &snapshot.records, &snapshot.authors);

        debug!(
            year = query.year,
            limit = query.window.limit,
            offset = query.window.offset,
            author_filter = ?query.author_name.as_ref().map(AuthorNameFilter::as_str),
            total = stats.total,
            page = stats.items.len(),
            "Computed yearly budget stats"
        );
        Ok(stats)
    }

    /// Clears every reference to `author_id`. Returns the number of records
    /// detached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn detach_author<C>(conn: &C, author_id: AuthorId) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = budget::Entity::update_many()
            .col_expr(budget::Column::AuthorId, Expr::value(Option::<Uuid>::None))
            .filter(budget::Column::AuthorId.eq(author_id.into_inner()))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
