//! Persistence-backed content providers.
//!
//! # Responsibility
//! - Implement the `ContentProvider` contract on top of SQLite.
//! - Keep SQL details out of the timeline core.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod daily_note_repo;
