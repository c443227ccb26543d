//! Budget record and yearly statistics routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use tally_core::budget::{
    AuthorNameFilter, BudgetRecord, BudgetYearStats, YearStatsQuery, validate_window,
};
use tally_db::BudgetRepository;

use crate::{AppState, error::ApiError};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget/add", post(add_record))
        .route("/budget/year/{year}/stats", get(year_stats))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query string for `GET /budget/year/{year}/stats`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStatsParams {
    /// Page size; falls back to the configured default.
    pub limit: Option<i64>,
    /// Records to skip; defaults to 0.
    pub offset: Option<i64>,
    /// Case-insensitive author name fragment narrowing the whole scope.
    pub author_name: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/budget/add` - Validate and store a record, echoing it back.
async fn add_record(
    State(state): State<AppState>,
    Json(payload): Json<BudgetRecord>,
) -> Result<Json<BudgetRecord>, ApiError> {
    let repo = BudgetRepository::new((*state.db).clone());
    let stored = repo.add(payload).await?;

    Ok(Json(stored.to_record()))
}

/// GET `/budget/year/{year}/stats` - Totals and one page of enriched records.
async fn year_stats(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(params): Query<YearStatsParams>,
) -> Result<Json<BudgetYearStats>, ApiError> {
    let window = validate_window(params.limit, params.offset, &state.stats)?;
    let query = YearStatsQuery::new(year, window).with_author_name(
        params
            .author_name
            .as_deref()
            .and_then(AuthorNameFilter::new),
    );

    let repo = BudgetRepository::new((*state.db).clone());
    let stats = repo.year_stats(&query).await?;

    Ok(Json(stats))
}
