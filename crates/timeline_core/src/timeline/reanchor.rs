//! Jump-to-date handling.
//!
//! # Invariants
//! - After `go_to_date(d)` the window is exactly `span` around `d` and the
//!   active day is offset 0.
//! - Exactly one active-day change results from a jump.

use crate::daily_note::provider::ContentProvider;
use crate::model::day::{ActiveDayChange, DayOffset, IntoCalendarDate};
use crate::timeline::clock::Clock;
use crate::timeline::error::WindowError;
use crate::timeline::visibility::VisibilityTracker;
use crate::timeline::window::{DayWindowManager, MaterializeReport};
use log::info;
use serde::{Deserialize, Serialize};

/// Days rendered around the anchor after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySpan {
    pub before: u32,
    pub after: u32,
}

impl Default for DaySpan {
    fn default() -> Self {
        Self {
            before: 3,
            after: 6,
        }
    }
}

impl DaySpan {
    pub fn min_offset(&self) -> DayOffset {
        -DayOffset::from(self.before)
    }

    pub fn max_offset(&self) -> DayOffset {
        DayOffset::from(self.after)
    }
}

/// Result of a jump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReanchorOutcome {
    /// The active day established by the jump (offset 0).
    pub change: ActiveDayChange,
    pub report: MaterializeReport,
}

/// Moves the anchor and rebuilds the window around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReanchorController {
    span: DaySpan,
}

impl ReanchorController {
    pub fn new(span: DaySpan) -> Self {
        Self { span }
    }

    pub fn span(&self) -> DaySpan {
        self.span
    }

    pub fn set_span(&mut self, span: DaySpan) {
        self.span = span;
    }

    /// Re-anchors at `target` (time of day discarded).
    pub fn go_to_date<P: ContentProvider>(
        &self,
        target: impl IntoCalendarDate,
        windows: &mut DayWindowManager<P>,
        tracker: &mut VisibilityTracker,
    ) -> Result<ReanchorOutcome, WindowError> {
        let anchor = target.into_calendar_date();
        let report = windows.rebuild_at(anchor, self.span.min_offset(), self.span.max_offset())?;
        let change = tracker.reset_to(ActiveDayChange {
            offset: 0,
            date: anchor,
        });
        info!(
            "event=reanchor module=timeline status=ok anchor={} min={} max={}",
            anchor,
            self.span.min_offset(),
            self.span.max_offset()
        );
        Ok(ReanchorOutcome { change, report })
    }

    /// Re-anchors at the clock's current date.
    pub fn go_to_today<P: ContentProvider>(
        &self,
        clock: &impl Clock,
        windows: &mut DayWindowManager<P>,
        tracker: &mut VisibilityTracker,
    ) -> Result<ReanchorOutcome, WindowError> {
        self.go_to_date(clock.today(), windows, tracker)
    }
}
