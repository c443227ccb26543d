//! Conversion of domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use tally_core::budget::BudgetError;
use tally_db::repositories::{AuthorError, BudgetStoreError};
use tally_shared::AppError;
use tracing::error;

/// Handler error rendered as `{ "error": <code>, "message": <text> }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Status code the response will carry.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(self.0.to_body())).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<BudgetStoreError> for ApiError {
    fn from(err: BudgetStoreError) -> Self {
        match err {
            BudgetStoreError::Invalid(e) => e.into(),
            e @ BudgetStoreError::UnknownAuthor(_) => Self(AppError::Validation(e.to_string())),
            BudgetStoreError::Database(e) => e.into(),
        }
    }
}

impl From<AuthorError> for ApiError {
    fn from(err: AuthorError) -> Self {
        match err {
            e @ AuthorError::NotFound(_) => Self(AppError::NotFound(e.to_string())),
            e @ (AuthorError::EmptyName | AuthorError::NameTooLong(_)) => {
                Self(AppError::Validation(e.to_string()))
            }
            AuthorError::Database(e) => e.into(),
        }
    }
}
