//! Yearly statistics aggregation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::author::AuthorLookup;

use super::enrichment::{enrich, resolve_author};
use super::types::{BudgetType, BudgetYearStats, StoredBudgetRecord, YearStatsQuery};

/// Computes `total`, `totalByType` and the enriched page for one year.
///
/// All three values are derived from the same slice of records, so callers
/// that hand in a single consistent snapshot get mutually consistent output.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Runs the yearly statistics query over `records`.
    ///
    /// Scope is every record whose `year` equals `query.year` (and whose
    /// author name matches `query.author_name`, when set). `total` and
    /// `total_by_type` cover the whole scope; `items` is the window of the
    /// scope sorted by month ascending, then amount descending.
    #[must_use]
    pub fn compute<L>(
        query: &YearStatsQuery,
        records: &[StoredBudgetRecord],
        authors: &L,
    ) -> BudgetYearStats
    where
        L: AuthorLookup + ?Sized,
    {
        let mut scope: Vec<&StoredBudgetRecord> = records
            .iter()
            .filter(|r| r.year == query.year)
            .filter(|r| match &query.author_name {
                None => true,
                Some(filter) => {
                    resolve_author(r, authors).is_some_and(|a| filter.matches(&a.full_name))
                }
            })
            .collect();

        let total = scope.len() as u64;
        let total_by_type = Self::sum_by_type(&scope);

        scope.sort_by(|a, b| Self::page_order(a, b));

        let items = scope[query.window.range(scope.len())]
            .iter()
            .map(|r| enrich(r, authors))
            .collect();

        BudgetYearStats {
            total,
            total_by_type,
            items,
        }
    }

    /// Sums `amount` per type. Only types present in `scope` get a key.
    #[must_use]
    pub fn sum_by_type(scope: &[&StoredBudgetRecord]) -> BTreeMap<BudgetType, i64> {
        scope.iter().fold(BTreeMap::new(), |mut acc, r| {
            *acc.entry(r.budget_type).or_insert(0) += i64::from(r.amount);
            acc
        })
    }

    /// Page order: month ascending, amount descending, then id so that
    /// repeated queries are byte-identical.
    #[must_use]
    pub fn page_order(a: &StoredBudgetRecord, b: &StoredBudgetRecord) -> Ordering {
        a.month
            .cmp(&b.month)
            .then_with(|| b.amount.cmp(&a.amount))
            .then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use tally_shared::types::{AuthorId, BudgetRecordId, PageWindow};

    use super::*;
    use crate::author::Author;
    use crate::budget::enrichment::{NO_AUTHOR_CREATED_AT, NO_AUTHOR_FULL_NAME};
    use crate::budget::types::AuthorNameFilter;

    fn stored(
        year: i32,
        month: i32,
        amount: i32,
        budget_type: BudgetType,
        author_id: Option<AuthorId>,
    ) -> StoredBudgetRecord {
        StoredBudgetRecord {
            id: BudgetRecordId::new(),
            year,
            month,
            amount,
            budget_type,
            author_id,
        }
    }

    fn author(name: &str) -> Author {
        Author {
            id: AuthorId::new(),
            full_name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn directory(authors: &[&Author]) -> HashMap<AuthorId, Author> {
        authors.iter().map(|a| (a.id, (*a).clone())).collect()
    }

    #[test]
    fn test_pagination_scenario() {
        let a1 = author("Author 1");
        let a2 = author("Author 2");
        let a3 = author("Author 3");
        let authors = directory(&[&a1, &a2, &a3]);

        let records = vec![
            stored(2020, 5, 10, BudgetType::Income, Some(a1.id)),
            stored(2020, 5, 5, BudgetType::Income, None),
            stored(2020, 5, 20, BudgetType::Income, Some(a2.id)),
            stored(2020, 5, 30, BudgetType::Income, None),
            stored(2020, 5, 40, BudgetType::Income, Some(a3.id)),
            stored(2030, 1, 1, BudgetType::Expense, None),
        ];

        let query = YearStatsQuery::new(2020, PageWindow::new(3, 1));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.items.len(), 3);
        assert_eq!(stats.total_by_type.get(&BudgetType::Income), Some(&105));
        assert_eq!(stats.total_by_type.get(&BudgetType::Expense), None);

        for item in &stats.items {
            if item.author_id.is_some() {
                assert_ne!(item.author_full_name, NO_AUTHOR_FULL_NAME);
                assert_ne!(item.author_created_at, NO_AUTHOR_CREATED_AT);
            } else {
                assert_eq!(item.author_full_name, NO_AUTHOR_FULL_NAME);
                assert_eq!(item.author_created_at, NO_AUTHOR_CREATED_AT);
            }
        }
    }

    #[test]
    fn test_sort_order_scenario() {
        let a1 = author("Author 1");
        let a2 = author("Author 2");
        let a3 = author("Author 3");
        let authors = directory(&[&a1, &a2, &a3]);

        let records = vec![
            stored(2020, 5, 100, BudgetType::Income, Some(a1.id)),
            stored(2020, 1, 5, BudgetType::Income, None),
            stored(2020, 5, 50, BudgetType::Income, Some(a2.id)),
            stored(2020, 1, 30, BudgetType::Income, None),
            stored(2020, 5, 400, BudgetType::Income, Some(a3.id)),
        ];

        let query = YearStatsQuery::new(2020, PageWindow::new(100, 0));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        let amounts: Vec<i32> = stats.items.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![30, 5, 400, 100, 50]);
    }

    #[test]
    fn test_amount_descends_regardless_of_type() {
        let records = vec![
            stored(2021, 2, 10, BudgetType::Expense, None),
            stored(2021, 2, 70, BudgetType::Income, None),
            stored(2021, 2, 40, BudgetType::Expense, None),
        ];

        let query = YearStatsQuery::new(2021, PageWindow::new(10, 0));
        let stats = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        let amounts: Vec<i32> = stats.items.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![70, 40, 10]);
        assert_eq!(stats.total_by_type.get(&BudgetType::Income), Some(&70));
        assert_eq!(stats.total_by_type.get(&BudgetType::Expense), Some(&50));
    }

    #[test]
    fn test_zero_limit_keeps_totals() {
        let records = vec![
            stored(2020, 1, 1, BudgetType::Income, None),
            stored(2020, 2, 2, BudgetType::Expense, None),
        ];

        let query = YearStatsQuery::new(2020, PageWindow::new(0, 0));
        let stats = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        assert!(stats.items.is_empty());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_by_type.len(), 2);
    }

    #[test]
    fn test_offset_past_end_keeps_totals() {
        let records = vec![stored(2020, 1, 9, BudgetType::Income, None)];

        let query = YearStatsQuery::new(2020, PageWindow::new(5, 1));
        let stats = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        assert!(stats.items.is_empty());
        assert_eq!(stats.total, 1);
        assert_eq!(stats.total_by_type.get(&BudgetType::Income), Some(&9));
    }

    #[test]
    fn test_empty_year() {
        let records = vec![stored(2019, 1, 9, BudgetType::Income, None)];

        let query = YearStatsQuery::new(2020, PageWindow::new(5, 0));
        let stats = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        assert_eq!(stats.total, 0);
        assert!(stats.total_by_type.is_empty());
        assert!(stats.items.is_empty());
    }

    #[test]
    fn test_sums_do_not_overflow_i32() {
        let records = vec![
            stored(2020, 1, i32::MAX, BudgetType::Income, None),
            stored(2020, 2, i32::MAX, BudgetType::Income, None),
        ];

        let query = YearStatsQuery::new(2020, PageWindow::new(5, 0));
        let stats = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        assert_eq!(
            stats.total_by_type.get(&BudgetType::Income),
            Some(&(2 * i64::from(i32::MAX)))
        );
    }

    #[test]
    fn test_author_name_filter_narrows_scope() {
        let ivan = author("Ivan Petrov");
        let anna = author("Anna Ivanova");
        let olga = author("Olga Smirnova");
        let authors = directory(&[&ivan, &anna, &olga]);

        let records = vec![
            stored(2020, 1, 10, BudgetType::Income, Some(ivan.id)),
            stored(2020, 2, 20, BudgetType::Expense, Some(anna.id)),
            stored(2020, 3, 30, BudgetType::Income, Some(olga.id)),
            stored(2020, 4, 40, BudgetType::Income, None),
        ];

        let query = YearStatsQuery::new(2020, PageWindow::new(10, 0))
            .with_author_name(AuthorNameFilter::new("IVAN"));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_by_type.get(&BudgetType::Income), Some(&10));
        assert_eq!(stats.total_by_type.get(&BudgetType::Expense), Some(&20));
        let names: Vec<&str> = stats
            .items
            .iter()
            .map(|i| i.author_full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Ivan Petrov", "Anna Ivanova"]);
    }

    #[test]
    fn test_blank_author_name_is_no_filter() {
        assert_eq!(AuthorNameFilter::new("   "), None);
        assert_eq!(
            AuthorNameFilter::new("  Ivan ").map(|f| f.as_str().to_string()),
            Some("ivan".to_string())
        );
    }

    #[test]
    fn test_repeated_query_is_identical() {
        let records: Vec<StoredBudgetRecord> = (0..20)
            .map(|i| stored(2020, i % 3 + 1, 7, BudgetType::Income, None))
            .collect();

        let query = YearStatsQuery::new(2020, PageWindow::new(8, 4));
        let first = StatsAggregator::compute(&query, &records, &HashMap::<AuthorId, Author>::new());

        let mut reversed = records.clone();
        reversed.reverse();
        let second = StatsAggregator::compute(&query, &reversed, &HashMap::<AuthorId, Author>::new());

        assert_eq!(first, second);
        assert_eq!(first.items.len(), 8);
    }
}
