//! Author enrichment for budget records.

use chrono::SecondsFormat;

use crate::author::{Author, AuthorLookup};

use super::types::{BudgetRecordResponse, StoredBudgetRecord};

/// Display name reported when a record has no resolvable author.
pub const NO_AUTHOR_FULL_NAME: &str = "Unknown";

/// Creation timestamp reported when a record has no resolvable author.
pub const NO_AUTHOR_CREATED_AT: &str = "N/A";

/// Resolves the author of `record`, if it has one and the lookup knows it.
pub fn resolve_author<'a, L>(record: &StoredBudgetRecord, authors: &'a L) -> Option<&'a Author>
where
    L: AuthorLookup + ?Sized,
{
    record.author_id.and_then(|id| authors.author(id))
}

/// Builds the enriched response for a stored record.
///
/// A missing or dangling author reference yields `authorId: null` together
/// with both sentinels; a resolved author never yields a sentinel.
pub fn enrich<L>(record: &StoredBudgetRecord, authors: &L) -> BudgetRecordResponse
where
    L: AuthorLookup + ?Sized,
{
    let (author_id, author_full_name, author_created_at) = match resolve_author(record, authors) {
        Some(author) => (
            Some(author.id),
            author.full_name.clone(),
            // Same rendering as chrono's serde output for `Author::created_at`
            author.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
        None => (
            None,
            NO_AUTHOR_FULL_NAME.to_string(),
            NO_AUTHOR_CREATED_AT.to_string(),
        ),
    };

    BudgetRecordResponse {
        year: record.year,
        month: record.month,
        amount: record.amount,
        budget_type: record.budget_type,
        author_id,
        author_full_name,
        author_created_at,
    }
}
