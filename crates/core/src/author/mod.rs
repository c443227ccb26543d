//! Author identity consumed read-only by budget enrichment.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::AuthorId;

/// An author that budget records may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Author ID.
    pub id: AuthorId,
    /// Display name.
    pub full_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Read-only author resolution by id.
///
/// Returning `None` means the reference cannot be resolved; callers degrade
/// to the "no author" sentinels instead of failing.
pub trait AuthorLookup {
    /// Looks up an author by id.
    fn author(&self, id: AuthorId) -> Option<&Author>;
}

impl AuthorLookup for HashMap<AuthorId, Author> {
    fn author(&self, id: AuthorId) -> Option<&Author> {
        self.get(&id)
    }
}
