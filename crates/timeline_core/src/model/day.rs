//! Day record model.
//!
//! # Responsibility
//! - Represent one materialized day together with its external handles.
//! - Carry per-day degradation (content or editor unavailable) as data, not
//!   as a failed batch.
//!
//! # Invariants
//! - `offset` and `date` are fixed at construction.
//! - A record without content never carries an editor.

use crate::daily_note::provider::{BindError, CreationError, DayError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Signed whole-day distance from the anchor date.
///
/// Negative values are in the past, positive values in the future.
pub type DayOffset = i64;

/// Materialization state of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// Content acquired and editor bound.
    Ready,
    /// Note could not be opened or created; no handles are held.
    ContentUnavailable(CreationError),
    /// Note exists but the editor could not attach to it.
    EditorUnavailable(BindError),
}

/// One materialized day in the timeline window.
///
/// `C` is the provider's content handle and `E` its editor handle.
#[derive(Debug)]
pub struct DayRecord<C, E> {
    offset: DayOffset,
    date: NaiveDate,
    content: Option<C>,
    editor: Option<E>,
    status: DayStatus,
}

impl<C, E> DayRecord<C, E> {
    /// Creates a fully usable record.
    pub fn ready(offset: DayOffset, date: NaiveDate, content: C, editor: E) -> Self {
        Self {
            offset,
            date,
            content: Some(content),
            editor: Some(editor),
            status: DayStatus::Ready,
        }
    }

    /// Creates a degraded record for a day whose note could not be acquired.
    pub fn content_unavailable(offset: DayOffset, date: NaiveDate, error: CreationError) -> Self {
        Self {
            offset,
            date,
            content: None,
            editor: None,
            status: DayStatus::ContentUnavailable(error),
        }
    }

    /// Creates a degraded record that keeps its content but has no editor.
    pub fn editor_unavailable(
        offset: DayOffset,
        date: NaiveDate,
        content: C,
        error: BindError,
    ) -> Self {
        Self {
            offset,
            date,
            content: Some(content),
            editor: None,
            status: DayStatus::EditorUnavailable(error),
        }
    }

    pub fn offset(&self) -> DayOffset {
        self.offset
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn editor(&self) -> Option<&E> {
        self.editor.as_ref()
    }

    pub fn status(&self) -> &DayStatus {
        &self.status
    }

    /// Returns whether the host should render an error placeholder.
    pub fn is_degraded(&self) -> bool {
        self.status != DayStatus::Ready
    }

    /// Returns the failure that degraded this record, if any.
    pub fn failure(&self) -> Option<DayError> {
        match &self.status {
            DayStatus::Ready => None,
            DayStatus::ContentUnavailable(err) => Some(DayError::Creation(err.clone())),
            DayStatus::EditorUnavailable(err) => Some(DayError::Bind(err.clone())),
        }
    }

    /// Consumes the record and hands back its handles for release.
    pub fn into_handles(self) -> (Option<C>, Option<E>) {
        (self.content, self.editor)
    }
}

/// Notification payload emitted when the active day changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveDayChange {
    pub offset: DayOffset,
    pub date: NaiveDate,
}

/// Conversion of date-like values into a bare calendar date.
///
/// Time-of-day (and time zone, after local projection) is discarded.
pub trait IntoCalendarDate {
    fn into_calendar_date(self) -> NaiveDate;
}

impl IntoCalendarDate for NaiveDate {
    fn into_calendar_date(self) -> NaiveDate {
        self
    }
}

impl IntoCalendarDate for NaiveDateTime {
    fn into_calendar_date(self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> IntoCalendarDate for DateTime<Tz> {
    fn into_calendar_date(self) -> NaiveDate {
        self.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::{DayRecord, DayStatus, IntoCalendarDate};
    use crate::daily_note::provider::{BindError, CreationError, DayError};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn datetime_is_normalized_to_bare_date() {
        let dt = ymd(2025, 1, 1).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(dt.into_calendar_date(), ymd(2025, 1, 1));
    }

    #[test]
    fn content_unavailable_record_holds_no_handles() {
        let err = CreationError::Write {
            path: "2025-01-01.md".to_string(),
            message: "disk full".to_string(),
        };
        let record: DayRecord<u8, u8> = DayRecord::content_unavailable(0, ymd(2025, 1, 1), err.clone());
        assert!(record.is_degraded());
        assert_eq!(record.failure(), Some(DayError::Creation(err)));
        assert_eq!(record.into_handles(), (None, None));
    }

    #[test]
    fn editor_unavailable_record_keeps_content() {
        let err = BindError {
            path: "2025-01-01.md".to_string(),
            message: "view refused".to_string(),
        };
        let record: DayRecord<u8, u8> = DayRecord::editor_unavailable(2, ymd(2025, 1, 3), 7, err);
        assert!(matches!(record.status(), DayStatus::EditorUnavailable(_)));
        assert_eq!(record.content(), Some(&7));
        assert!(record.editor().is_none());
    }
}
