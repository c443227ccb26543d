//! Budget error types.

use thiserror::Error;

/// Budget-related errors. Every variant is a malformed-input error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Month is outside `1..=12`.
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i32),

    /// Negative page size.
    #[error("limit must not be negative, got {0}")]
    NegativeLimit(i64),

    /// Negative page offset.
    #[error("offset must not be negative, got {0}")]
    NegativeOffset(i64),
}
