//! Calendar overlay helpers.
//!
//! The overlay follows the active day and lets users drop event summaries
//! into the last focused day's note. Fetching events is the host's job; this
//! module only decides list context and formats them.

pub mod attendees;
pub mod events;
