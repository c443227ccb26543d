//! Property-based tests for the yearly statistics laws.

use std::collections::HashMap;

use chrono::Utc;
use proptest::prelude::*;
use tally_shared::types::{AuthorId, BudgetRecordId, PageWindow};

use super::enrichment::{NO_AUTHOR_CREATED_AT, NO_AUTHOR_FULL_NAME};
use super::stats::StatsAggregator;
use super::types::{BudgetType, StoredBudgetRecord, YearStatsQuery};
use crate::author::Author;

/// Fixed author pool; records reference these by index, or a dangling id.
fn author_pool() -> Vec<Author> {
    (0..3)
        .map(|i| Author {
            id: AuthorId::new(),
            full_name: format!("Author {i}"),
            created_at: Utc::now(),
        })
        .collect()
}

/// Author slot: 0..3 picks from the pool, 3 is no author, 4 is dangling.
fn record_strategy() -> impl Strategy<Value = (i32, i32, i32, bool, u8)> {
    (
        2019i32..2022,
        1i32..=12,
        -1_000i32..1_000,
        any::<bool>(),
        0u8..5,
    )
}

fn build(
    raw: &[(i32, i32, i32, bool, u8)],
    pool: &[Author],
) -> Vec<StoredBudgetRecord> {
    raw.iter()
        .map(|&(year, month, amount, income, slot)| StoredBudgetRecord {
            id: BudgetRecordId::new(),
            year,
            month,
            amount,
            budget_type: if income {
                BudgetType::Income
            } else {
                BudgetType::Expense
            },
            author_id: match slot {
                0..=2 => Some(pool[usize::from(slot)].id),
                3 => None,
                _ => Some(AuthorId::new()),
            },
        })
        .collect()
}

fn directory(pool: &[Author]) -> HashMap<AuthorId, Author> {
    pool.iter().map(|a| (a.id, a.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `total` counts every record of the year regardless of the window.
    #[test]
    fn prop_total_ignores_window(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
        limit in 0u64..50,
        offset in 0u64..50,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(limit, offset));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        let expected = records.iter().filter(|r| r.year == year).count() as u64;
        prop_assert_eq!(stats.total, expected);
    }

    /// `totalByType[T]` sums the whole year for T and omits absent types.
    #[test]
    fn prop_total_by_type_ignores_window(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
        limit in 0u64..50,
        offset in 0u64..50,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(limit, offset));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        for budget_type in BudgetType::ALL {
            let matching: Vec<i64> = records
                .iter()
                .filter(|r| r.year == year && r.budget_type == budget_type)
                .map(|r| i64::from(r.amount))
                .collect();

            if matching.is_empty() {
                prop_assert!(!stats.total_by_type.contains_key(&budget_type));
            } else {
                prop_assert_eq!(
                    stats.total_by_type.get(&budget_type).copied(),
                    Some(matching.iter().sum::<i64>())
                );
            }
        }
    }

    /// `items.len() == min(limit, max(0, total - offset))`.
    #[test]
    fn prop_page_length(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
        limit in 0u64..50,
        offset in 0u64..50,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(limit, offset));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        let expected = limit.min(stats.total.saturating_sub(offset));
        prop_assert_eq!(stats.items.len() as u64, expected);
    }

    /// Month ascending; within a month, amount descending.
    #[test]
    fn prop_sort_law(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(100, 0));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        for pair in stats.items.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.month <= b.month);
            if a.month == b.month {
                prop_assert!(a.amount >= b.amount);
            }
        }
    }

    /// A page is the matching slice of the full sorted sequence.
    #[test]
    fn prop_page_is_slice_of_full_order(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
        limit in 0u64..20,
        offset in 0u64..20,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let full = StatsAggregator::compute(
            &YearStatsQuery::new(year, PageWindow::new(1_000, 0)),
            &records,
            &authors,
        );
        let window = PageWindow::new(limit, offset);
        let page = StatsAggregator::compute(&YearStatsQuery::new(year, window), &records, &authors);

        prop_assert_eq!(&page.items[..], &full.items[window.range(full.items.len())]);
        prop_assert_eq!(page.total, full.total);
        prop_assert_eq!(page.total_by_type, full.total_by_type);
    }

    /// Resolved author never shows a sentinel; no resolved author shows both.
    #[test]
    fn prop_enrichment_law(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(100, 0));
        let stats = StatsAggregator::compute(&query, &records, &authors);

        for item in &stats.items {
            if item.author_id.is_some() {
                prop_assert_ne!(item.author_full_name.as_str(), NO_AUTHOR_FULL_NAME);
                prop_assert_ne!(item.author_created_at.as_str(), NO_AUTHOR_CREATED_AT);
            } else {
                prop_assert_eq!(item.author_full_name.as_str(), NO_AUTHOR_FULL_NAME);
                prop_assert_eq!(item.author_created_at.as_str(), NO_AUTHOR_CREATED_AT);
            }
        }
    }

    /// Same input, same output, serialized byte for byte.
    #[test]
    fn prop_idempotent(
        raw in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2022,
        limit in 0u64..20,
        offset in 0u64..20,
    ) {
        let pool = author_pool();
        let records = build(&raw, &pool);
        let authors = directory(&pool);

        let query = YearStatsQuery::new(year, PageWindow::new(limit, offset));
        let first = serde_json::to_string(&StatsAggregator::compute(&query, &records, &authors)).unwrap();
        let second = serde_json::to_string(&StatsAggregator::compute(&query, &records, &authors)).unwrap();

        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_stats_wire_shape() {
    let records = vec![StoredBudgetRecord {
        id: BudgetRecordId::new(),
        year: 2020,
        month: 1,
        amount: 15,
        budget_type: BudgetType::Expense,
        author_id: None,
    }];

    let stats = StatsAggregator::compute(
        &YearStatsQuery::new(2020, PageWindow::new(10, 0)),
        &records,
        &HashMap::<AuthorId, Author>::new(),
    );
    let json = serde_json::to_value(&stats).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "total": 1,
            "totalByType": { "expense": 15 },
            "items": [{
                "year": 2020,
                "month": 1,
                "amount": 15,
                "type": "expense",
                "authorId": null,
                "authorFullName": "Unknown",
                "authorCreatedAt": "N/A"
            }]
        })
    );
}
