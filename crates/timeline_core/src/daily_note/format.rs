//! Date formatting and filename date parsing for daily notes.
//!
//! Daily note settings use moment-style patterns (`YYYY-MM-DD`); chrono uses
//! strftime. Only the tokens listed in `MOMENT_TOKEN_RE` are translated, text
//! inside `[...]` is emitted literally, everything else is copied as-is.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern used when the configured format is blank.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

// Alternation is leftmost-first: longer tokens must precede their prefixes.
static MOMENT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\]|YYYY|YY|MMMM|MMM|MM|M|DD|D|dddd|ddd")
        .expect("valid moment token regex")
});
static FILENAME_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid filename date regex"));

/// Translates a moment-style pattern into a chrono format string.
pub fn to_chrono_format(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut last = 0;
    for token in MOMENT_TOKEN_RE.find_iter(pattern) {
        push_literal(&mut out, &pattern[last..token.start()]);
        let directive = match token.as_str() {
            "YYYY" => "%Y",
            "YY" => "%y",
            "MMMM" => "%B",
            "MMM" => "%b",
            "MM" => "%m",
            "M" => "%-m",
            "DD" => "%d",
            "D" => "%-d",
            "dddd" => "%A",
            "ddd" => "%a",
            escaped => {
                push_literal(&mut out, &escaped[1..escaped.len() - 1]);
                ""
            }
        };
        out.push_str(directive);
        last = token.end();
    }
    push_literal(&mut out, &pattern[last..]);
    out
}

/// Formats `date` using a moment-style pattern.
///
/// A blank pattern falls back to `DEFAULT_DATE_FORMAT`.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let pattern = if pattern.trim().is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        pattern.trim()
    };
    date.format(&to_chrono_format(pattern)).to_string()
}

/// Formats `date` as `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Extracts the first valid `YYYY-MM-DD` date from a note filename.
///
/// Accepts names such as `2025-06-15`, `2025-06-15.md`,
/// `2025-06-15 Sunday.md` and `Sunday 2025-06-15.md`.
pub fn parse_date_from_filename(filename: &str) -> Option<NaiveDate> {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let caps = FILENAME_DATE_RE.captures(stem)?;
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns whether a filename carries a valid daily-note date.
pub fn is_daily_note_filename(filename: &str) -> bool {
    parse_date_from_filename(filename).is_some()
}

fn push_literal(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
    }
}
