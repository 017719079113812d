//! CLI smoke entry point for the timeline core.
//!
//! # Responsibility
//! - Open a daily-note store and build a timeline window around a date.
//! - Print the window deterministically for quick local sanity checks.
//!
//! Usage: `timeline_cli [db_path] [YYYY-MM-DD]`. Without `db_path` an
//! in-memory store is used; without a date the window is built around today.
//! Set `TIMELINE_LOG_DIR` to an absolute directory to enable file logging.

use chrono::NaiveDate;
use log::warn;
use std::process::ExitCode;
use timeline_core::{
    default_log_level, init_logging, ActiveDayChange, DayStatus, NotificationSink,
    SqliteDailyNoteStore, TimelineConfig, TimelineSession,
};

struct PrintSink;

impl NotificationSink for PrintSink {
    fn active_day_changed(&mut self, change: &ActiveDayChange) {
        println!("active offset={} date={}", change.offset, change.date);
    }

    fn notice(&mut self, message: &str) {
        eprintln!("notice: {message}");
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Ok(log_dir) = std::env::var("TIMELINE_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut args = std::env::args().skip(1);
    let db_path = args.next().filter(|arg| arg != "-");
    let target = args.next().map(|arg| parse_date(&arg)).transpose()?;

    let store = match db_path.as_deref() {
        Some(path) => SqliteDailyNoteStore::open_file(path),
        None => SqliteDailyNoteStore::open_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    println!("timeline_core version={}", timeline_core::core_version());
    let mut session = TimelineSession::new(store, PrintSink, TimelineConfig::default());
    match target {
        Some(date) => session.go_to_date(date),
        None => session.open(),
    }
    .map_err(|err| err.to_string())?;

    for day in session.window().iter() {
        let status = match day.status() {
            DayStatus::Ready => "ready".to_string(),
            DayStatus::ContentUnavailable(err) => format!("content_unavailable ({err})"),
            DayStatus::EditorUnavailable(err) => format!("editor_unavailable ({err})"),
        };
        println!("day offset={} date={} status={}", day.offset(), day.date(), status);
    }

    session.close();
    if let Ok(open) = session.provider().open_editor_count() {
        if open != 0 {
            warn!("event=cli_close module=cli status=error open_editors={}", open);
        }
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}`, expected YYYY-MM-DD: {err}"))
}
