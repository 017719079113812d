//! Event insertion text for the last focused day's note.
//!
//! # Invariants
//! - Bullets are added only when the cursor line is not already list context.
//! - Several events are joined with `\n`, one event per line.

use super::attendees::{format_event_bullet, Attendee};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// `- `, `* `, `+ ` (or a bare marker at end of line) and `1. `, indented or not.
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*+](\s|$)|^\s*\d+\.\s").expect("valid list item regex"));

/// Calendar event as handed over by the host's event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl CalendarEvent {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            attendees: Vec::new(),
        }
    }

    pub fn with_attendees(mut self, attendees: Vec<Attendee>) -> Self {
        self.attendees = attendees;
        self
    }
}

/// Returns whether text inserted at `line` continues a list.
///
/// True when `line` is itself a list item, or when it is blank directly
/// below a list item.
pub fn is_list_context(line: &str, previous_line: Option<&str>) -> bool {
    if LIST_ITEM_RE.is_match(line) {
        return true;
    }
    line.trim().is_empty() && previous_line.is_some_and(|previous| LIST_ITEM_RE.is_match(previous))
}

/// Formats `events` one per line; bullets are omitted inside a list.
pub fn format_events(events: &[CalendarEvent], in_list: bool) -> String {
    events
        .iter()
        .map(|event| format_event_bullet(&event.summary, &event.attendees, !in_list))
        .collect::<Vec<_>>()
        .join("\n")
}
