//! Template rendering for newly created daily notes.
//!
//! Supported placeholders: `{{date}}` and `{{date:YYYY-MM-DD}}` (ISO date),
//! `{{day}}` (weekday name), `{{month}}` (month name), `{{year}}`.
//! Unknown placeholders are left untouched.

use super::format::iso_date;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Line count of the blank body used when no template applies.
const BLANK_NOTE_LINES: usize = 10;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(date:YYYY-MM-DD|date|day|month|year)\}\}").expect("valid placeholder regex")
});

/// Substitutes date placeholders in `template`.
pub fn render_template(template: &str, date: NaiveDate) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "day" => date.format("%A").to_string(),
            "month" => date.format("%B").to_string(),
            "year" => date.year().to_string(),
            _ => iso_date(date),
        })
        .into_owned()
}

/// Body for a new note created without a template.
pub fn blank_note_content() -> String {
    "\n".repeat(BLANK_NOTE_LINES)
}
