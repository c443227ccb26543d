//! Budget records, the record validator, and yearly statistics.

pub mod enrichment;
pub mod error;
pub mod stats;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use enrichment::{NO_AUTHOR_CREATED_AT, NO_AUTHOR_FULL_NAME, enrich};
pub use error::BudgetError;
pub use stats::StatsAggregator;
pub use types::{
    AuthorNameFilter, BudgetRecord, BudgetRecordResponse, BudgetType, BudgetYearStats,
    StoredBudgetRecord, ValidBudgetRecord, YearStatsQuery,
};
pub use validation::{MONTH_RANGE, validate_record, validate_window};
