//! Budget data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_shared::types::{AuthorId, BudgetRecordId, PageWindow};

/// Budget record type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl BudgetType {
    /// All known variants.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Wire name of the type, also used as the `totalByType` key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for BudgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate budget record as submitted for storage.
///
/// This is also the shape echoed back by the add operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: i32,
    /// Monetary figure.
    pub amount: i32,
    /// Record type.
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    /// Optional author reference.
    #[serde(default)]
    pub author_id: Option<AuthorId>,
}

/// A record that passed the record validator. Only obtainable through
/// [`validate_record`](super::validation::validate_record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBudgetRecord(pub(crate) BudgetRecord);

impl ValidBudgetRecord {
    /// Borrows the validated record.
    #[must_use]
    pub const fn record(&self) -> &BudgetRecord {
        &self.0
    }

    /// Returns the validated record.
    #[must_use]
    pub fn into_inner(self) -> BudgetRecord {
        self.0
    }
}

/// A budget record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBudgetRecord {
    /// Record ID.
    pub id: BudgetRecordId,
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: i32,
    /// Monetary figure.
    pub amount: i32,
    /// Record type.
    pub budget_type: BudgetType,
    /// Optional author reference. Cleared when the author is deleted.
    pub author_id: Option<AuthorId>,
}

impl StoredBudgetRecord {
    /// Attaches a storage identity to a validated record.
    #[must_use]
    pub fn from_valid(id: BudgetRecordId, valid: ValidBudgetRecord) -> Self {
        let record = valid.into_inner();
        Self {
            id,
            year: record.year,
            month: record.month,
            amount: record.amount,
            budget_type: record.budget_type,
            author_id: record.author_id,
        }
    }

    /// The record fields without the storage identity.
    #[must_use]
    pub const fn to_record(&self) -> BudgetRecord {
        BudgetRecord {
            year: self.year,
            month: self.month,
            amount: self.amount,
            budget_type: self.budget_type,
            author_id: self.author_id,
        }
    }
}

/// A record enriched with author display fields resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecordResponse {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: i32,
    /// Monetary figure.
    pub amount: i32,
    /// Record type.
    #[serde(rename = "type")]
    pub budget_type: BudgetType,
    /// Resolved author ID, `null` when absent or unresolvable.
    pub author_id: Option<AuthorId>,
    /// Author display name or the "no author" sentinel.
    pub author_full_name: String,
    /// Author creation time (RFC 3339) or the "no author" sentinel.
    pub author_created_at: String,
}

/// Yearly statistics: totals over the whole scope plus one sorted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetYearStats {
    /// Number of records in scope, independent of pagination.
    pub total: u64,
    /// Sum of `amount` per type over the whole scope. Types with no
    /// records in scope are omitted.
    pub total_by_type: BTreeMap<BudgetType, i64>,
    /// The sorted, paginated, enriched page.
    pub items: Vec<BudgetRecordResponse>,
}

/// Case-insensitive substring match on the resolved author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorNameFilter(String);

impl AuthorNameFilter {
    /// Builds a filter from raw input. Blank input means "no filter".
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// Whether `full_name` contains the filter, ignoring case.
    #[must_use]
    pub fn matches(&self, full_name: &str) -> bool {
        full_name.to_lowercase().contains(&self.0)
    }

    /// The normalized (lowercased) needle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parameters of a yearly statistics query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStatsQuery {
    /// Exact year to match.
    pub year: i32,
    /// Page window applied after sorting.
    pub window: PageWindow,
    /// Optional narrowing of the scope by author name.
    pub author_name: Option<AuthorNameFilter>,
}

impl YearStatsQuery {
    /// Creates a query without an author filter.
    #[must_use]
    pub const fn new(year: i32, window: PageWindow) -> Self {
        Self {
            year,
            window,
            author_name: None,
        }
    }

    /// Narrows the scope to records whose author name matches.
    #[must_use]
    pub fn with_author_name(mut self, filter: Option<AuthorNameFilter>) -> Self {
        self.author_name = filter;
        self
    }
}
