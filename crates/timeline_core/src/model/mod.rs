//! Timeline domain model.
//!
//! # Responsibility
//! - Define the day-level records shared by windowing, tracking and re-anchoring.
//! - Keep host handles opaque: the core never inspects content or editor handles.
//!
//! # Invariants
//! - A day is identified by its signed offset from the current anchor date.
//! - A record's offset and date never change after creation.

pub mod day;
