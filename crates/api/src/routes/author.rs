//! Author directory routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tally_core::author::Author;
use tally_db::AuthorRepository;
use tally_shared::types::AuthorId;

use crate::{AppState, error::ApiError};

/// Creates the author routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/author/add", post(create_author))
        .route("/author/{id}", get(get_author).delete(delete_author))
}

/// Request body for creating an author.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    /// Display name; surrounding whitespace is trimmed.
    pub full_name: String,
}

/// POST `/author/add` - Create an author.
async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthorRequest>,
) -> Result<Json<Author>, ApiError> {
    let repo = AuthorRepository::new((*state.db).clone());
    let author = repo.create(&payload.full_name).await?;

    Ok(Json(author))
}

/// GET `/author/{id}` - Fetch one author.
async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<AuthorId>,
) -> Result<Json<Author>, ApiError> {
    let repo = AuthorRepository::new((*state.db).clone());
    Ok(Json(repo.get(id).await?))
}

/// DELETE `/author/{id}` - Remove an author and detach its records.
async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<AuthorId>,
) -> Result<StatusCode, ApiError> {
    let repo = AuthorRepository::new((*state.db).clone());
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
