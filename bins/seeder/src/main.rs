//! Database seeder for Tally development and testing.
//!
//! Seeds three authors and a handful of 2020 budget records so that
//! `GET /budget/year/2020/stats` has something to page through.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use tally_core::budget::{BudgetRecord, BudgetType};
use tally_db::{AuthorRepository, BudgetRepository, connect_with_config};
use tally_shared::{AppConfig, types::AuthorId};

/// Year the seed records belong to.
const SEED_YEAR: i32 = 2020;

const AUTHOR_NAMES: [&str; 3] = ["Author 1", "Author 2", "Author 3"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = connect_with_config(&config.database)
        .await
        .context("Failed to connect to database")?;

    let authors = AuthorRepository::new(db.clone());
    let budget = BudgetRepository::new(db);

    let existing = budget.year_snapshot(SEED_YEAR).await?;
    if !existing.records.is_empty() {
        println!(
            "  {} records already exist for {SEED_YEAR}, skipping...",
            existing.records.len()
        );
        return Ok(());
    }

    println!("Seeding authors...");
    let mut author_ids = Vec::with_capacity(AUTHOR_NAMES.len());
    for name in AUTHOR_NAMES {
        let author = authors.create(name).await?;
        println!("  {} ({})", author.full_name, author.id);
        author_ids.push(author.id);
    }

    println!("Seeding budget records...");
    for record in seed_records(&author_ids) {
        budget.add(record).await?;
    }

    println!("Seeding complete!");
    Ok(())
}

/// Mixed income and expense records across two months, some without an
/// author.
fn seed_records(authors: &[AuthorId]) -> Vec<BudgetRecord> {
    let author = |i: usize| authors.get(i).copied();

    [
        (1, 5, BudgetType::Income, None),
        (1, 30, BudgetType::Income, None),
        (5, 100, BudgetType::Income, author(0)),
        (5, 50, BudgetType::Expense, author(1)),
        (5, 400, BudgetType::Income, author(2)),
        (7, 75, BudgetType::Expense, author(0)),
    ]
    .into_iter()
    .map(|(month, amount, budget_type, author_id)| BudgetRecord {
        year: SEED_YEAR,
        month,
        amount,
        budget_type,
        author_id,
    })
    .collect()
}
