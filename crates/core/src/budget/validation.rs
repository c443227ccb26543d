//! Record validator and page window checks.

use std::ops::RangeInclusive;

use tally_shared::{StatsConfig, types::PageWindow};

use super::error::BudgetError;
use super::types::{BudgetRecord, ValidBudgetRecord};

/// Accepted month values.
pub const MONTH_RANGE: RangeInclusive<i32> = 1..=12;

/// Admits a candidate record for storage.
///
/// Year, amount and type are structurally required but otherwise
/// unconstrained; only the month is range-checked.
///
/// # Errors
///
/// Returns `BudgetError::MonthOutOfRange` if the month is outside `1..=12`.
pub fn validate_record(candidate: BudgetRecord) -> Result<ValidBudgetRecord, BudgetError> {
    if !MONTH_RANGE.contains(&candidate.month) {
        return Err(BudgetError::MonthOutOfRange(candidate.month));
    }

    Ok(ValidBudgetRecord(candidate))
}

/// Turns raw `limit`/`offset` request values into a page window.
///
/// Missing values fall back to `config.default_limit` and `0`.
///
/// # Errors
///
/// Returns `BudgetError::NegativeLimit` or `BudgetError::NegativeOffset` for
/// negative input. Any non-negative limit is accepted.
pub fn validate_window(
    limit: Option<i64>,
    offset: Option<i64>,
    config: &StatsConfig,
) -> Result<PageWindow, BudgetError> {
    let limit = match limit {
        None => config.default_limit,
        Some(l) => u64::try_from(l).map_err(|_| BudgetError::NegativeLimit(l))?,
    };
    let offset = match offset {
        None => 0,
        Some(o) => u64::try_from(o).map_err(|_| BudgetError::NegativeOffset(o))?,
    };

    Ok(PageWindow::new(limit, offset))
}
