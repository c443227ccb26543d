//! Offset/limit window for paginated queries.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A validated, non-negative page window.
///
/// `offset` items are skipped after sorting, then at most `limit` items are
/// taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Maximum number of items in the page.
    pub limit: u64,
    /// Number of items skipped before the page starts.
    pub offset: u64,
}

impl PageWindow {
    /// Creates a new page window.
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Returns the index range this window selects from a sequence of
    /// `total` items. Empty when `offset >= total` or `limit == 0`.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(total);
        let len = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(total);
        start..end
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
