//! Headless core for an infinite-scrolling timeline of daily notes.
//! Hosts own rendering, the viewport and editors; this crate owns which days
//! exist, which day is active, and how each day's note is acquired.

pub mod daily_note;
pub mod db;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod repo;
pub mod timeline;

pub use daily_note::config::DailyNoteConfig;
pub use daily_note::format::{format_date, is_daily_note_filename, parse_date_from_filename};
pub use daily_note::provider::{BindError, ContentProvider, CreationError, DayError, NoteLocation};
pub use daily_note::template::render_template;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::day::{ActiveDayChange, DayOffset, DayRecord, DayStatus, IntoCalendarDate};
pub use overlay::attendees::{format_attendees, format_event_bullet, Attendee};
pub use overlay::events::{format_events, is_list_context, CalendarEvent};
pub use repo::daily_note_repo::{
    EditorSession, NoteId, RepoError, RepoResult, SqliteDailyNoteStore, StoredNote,
};
pub use timeline::clock::{Clock, FixedClock, LocalClock};
pub use timeline::config::TimelineConfig;
pub use timeline::error::{ExtensionConflict, WindowError};
pub use timeline::offset_index::OffsetIndex;
pub use timeline::reanchor::{DaySpan, ReanchorController, ReanchorOutcome};
pub use timeline::session::{NotificationSink, ScrollMetrics, ScrollResponse, TimelineSession};
pub use timeline::visibility::{TrackerConfig, ViewportBatch, VisibilitySample, VisibilityTracker};
pub use timeline::window::{
    DayFailure, DayWindowManager, ExtensionDirection, ExtensionPlan, MaterializeReport,
    ProviderRecord,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
