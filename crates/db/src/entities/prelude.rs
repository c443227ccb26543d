//! Entity re-exports.

pub use super::author::Entity as Author;
pub use super::budget::Entity as Budget;
