//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `author` - Author identity as seen by budget enrichment
//! - `budget` - Record validation and yearly statistics aggregation

pub mod author;
pub mod budget;
