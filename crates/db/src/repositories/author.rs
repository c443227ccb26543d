//! Author directory: create, look up and delete authors.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tally_core::author::Author;
use tally_shared::types::AuthorId;
use tracing::info;

use super::budget::BudgetRepository;
use crate::entities::author;

/// Longest accepted author name, in characters.
pub const MAX_FULL_NAME_LEN: usize = 255;

/// Error types for author operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthorError {
    /// Author not found.
    #[error("Author not found: {0}")]
    NotFound(AuthorId),

    /// Name is empty after trimming.
    #[error("Author name must not be empty")]
    EmptyName,

    /// Name exceeds the column width.
    #[error("Author name must be at most 255 characters, got {0}")]
    NameTooLong(usize),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<author::Model> for Author {
    fn from(model: author::Model) -> Self {
        Self {
            id: AuthorId::from_uuid(model.id),
            full_name: model.full_name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Author repository.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    db: DatabaseConnection,
}

impl AuthorRepository {
    /// Creates a new author repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an author stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `AuthorError::EmptyName` or `AuthorError::NameTooLong` for a
    /// bad name, or a database error if the insert fails.
    pub async fn create(&self, full_name: &str) -> Result<Author, AuthorError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthorError::EmptyName);
        }
        let len = full_name.chars().count();
        if len > MAX_FULL_NAME_LEN {
            return Err(AuthorError::NameTooLong(len));
        }

        let model = author::ActiveModel {
            id: Set(AuthorId::new().into_inner()),
            full_name: Set(full_name.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(author_id = %model.id, "Author created");
        Ok(model.into())
    }

    /// Finds an author by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, DbErr> {
        let model = author::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(Author::from))
    }

    /// Gets an author by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthorError::NotFound` if there is no such author.
    pub async fn get(&self, id: AuthorId) -> Result<Author, AuthorError> {
        self.find_by_id(id).await?.ok_or(AuthorError::NotFound(id))
    }

    /// Batch lookup on any connection or transaction. Unknown ids are
    /// simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_many<C>(
        conn: &C,
        ids: &BTreeSet<AuthorId>,
    ) -> Result<HashMap<AuthorId, Author>, DbErr>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = author::Entity::find()
            .filter(author::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .all(conn)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let author = Author::from(m);
                (author.id, author)
            })
            .collect())
    }

    /// Deletes an author. Budget records referencing it are detached in the
    /// same transaction, never deleted.
    ///
    /// # Errors
    ///
    /// Returns `AuthorError::NotFound` if there is no such author.
    pub async fn delete(&self, id: AuthorId) -> Result<(), AuthorError> {
        let txn = self.db.begin().await?;

        let detached = BudgetRepository::detach_author(&txn, id).await?;
        let result = author::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AuthorError::NotFound(id));
        }

        txn.commit().await?;
        info!(author_id = %id, detached, "Author deleted");
        Ok(())
    }
}
