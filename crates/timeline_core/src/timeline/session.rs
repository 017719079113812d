//! Timeline session facade.
//!
//! # Responsibility
//! - Wire window manager, visibility tracker and re-anchor controller to a
//!   notification sink and a clock.
//! - Translate scroll metrics into edge extensions.
//! - Report per-day failures to the sink as transient notices.
//!
//! # Invariants
//! - Every active-day change reaches the sink exactly once.
//! - A jump emits exactly one change, after the rebuild completes.
//! - The session never mutates the window directly; it goes through the
//!   window manager.

use crate::daily_note::provider::ContentProvider;
use crate::model::day::{ActiveDayChange, DayOffset, IntoCalendarDate};
use crate::timeline::clock::{Clock, LocalClock};
use crate::timeline::config::TimelineConfig;
use crate::timeline::error::{ExtensionConflict, WindowError};
use crate::timeline::offset_index::OffsetIndex;
use crate::timeline::reanchor::ReanchorController;
use crate::timeline::visibility::{ViewportBatch, VisibilityTracker};
use crate::timeline::window::{
    DayWindowManager, ExtensionDirection, ExtensionPlan, MaterializeReport, ProviderRecord,
};
use chrono::NaiveDate;
use log::info;

/// Receiver of timeline notifications.
pub trait NotificationSink {
    /// The active day changed; drive overlays from `change.date`.
    fn active_day_changed(&mut self, change: &ActiveDayChange);

    /// A transient, user-facing message (e.g. a note failed to load).
    fn notice(&mut self, _message: &str) {}
}

/// Scroll container geometry, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// Which edges a scroll event extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollResponse {
    pub extended_backward: bool,
    pub extended_forward: bool,
}

/// One open timeline.
pub struct TimelineSession<P: ContentProvider, S: NotificationSink, C: Clock = LocalClock> {
    config: TimelineConfig,
    windows: DayWindowManager<P>,
    tracker: VisibilityTracker,
    reanchor: ReanchorController,
    sink: S,
    clock: C,
}

impl<P: ContentProvider, S: NotificationSink> TimelineSession<P, S, LocalClock> {
    /// Creates a session using the local wall clock.
    pub fn new(provider: P, sink: S, config: TimelineConfig) -> Self {
        Self::with_clock(provider, sink, LocalClock, config)
    }
}

impl<P: ContentProvider, S: NotificationSink, C: Clock> TimelineSession<P, S, C> {
    /// Creates a closed session; call `open` to build the first window.
    pub fn with_clock(provider: P, sink: S, clock: C, config: TimelineConfig) -> Self {
        let windows = DayWindowManager::new(provider, config.daily_notes.clone(), clock.today());
        Self {
            tracker: VisibilityTracker::new(config.tracker_config()),
            reanchor: ReanchorController::new(config.initial_span),
            windows,
            sink,
            clock,
            config,
        }
    }

    /// Anchors at today and builds the initial window.
    pub fn open(&mut self) -> Result<ActiveDayChange, WindowError> {
        info!("event=session_open module=timeline status=start");
        self.go_to_today()
    }

    /// Releases every day and forgets visibility state.
    pub fn close(&mut self) {
        self.windows.clear();
        self.tracker.clear();
        info!("event=session_close module=timeline status=ok");
    }

    /// Jumps to `target`, rebuilding the window around it.
    pub fn go_to_date(
        &mut self,
        target: impl IntoCalendarDate,
    ) -> Result<ActiveDayChange, WindowError> {
        let outcome = self
            .reanchor
            .go_to_date(target, &mut self.windows, &mut self.tracker)?;
        self.report_failures(&outcome.report);
        self.sink.active_day_changed(&outcome.change);
        Ok(outcome.change)
    }

    /// Jumps to the clock's current date.
    pub fn go_to_today(&mut self) -> Result<ActiveDayChange, WindowError> {
        let today = self.clock.today();
        self.go_to_date(today)
    }

    pub fn extend_backward(&mut self, count: usize) -> MaterializeReport {
        let report = self.windows.extend_backward(count);
        self.report_failures(&report);
        report
    }

    pub fn extend_forward(&mut self, count: usize) -> MaterializeReport {
        let report = self.windows.extend_forward(count);
        self.report_failures(&report);
        report
    }

    /// Plans an extension for hosts that materialize days asynchronously.
    pub fn begin_extension(
        &mut self,
        direction: ExtensionDirection,
        count: usize,
    ) -> Result<Option<ExtensionPlan>, ExtensionConflict> {
        self.windows.begin_extension(direction, count)
    }

    /// Runs the per-day creation path for one planned offset.
    pub fn materialize(&self, plan: &ExtensionPlan, offset: DayOffset) -> ProviderRecord<P> {
        self.windows.materialize(plan, offset)
    }

    /// Attaches the records of a planned extension.
    pub fn complete_extension(
        &mut self,
        plan: ExtensionPlan,
        records: Vec<ProviderRecord<P>>,
    ) -> MaterializeReport {
        let report = self.windows.complete_extension(plan, records);
        self.report_failures(&report);
        report
    }

    /// Extends the window when the scroll position nears either edge.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> ScrollResponse {
        let threshold = self.config.load_more_threshold_px;
        let batch = self.config.extension_batch;
        let mut response = ScrollResponse::default();

        if metrics.scroll_top < threshold {
            response.extended_backward = !self.extend_backward(batch).inserted.is_empty();
        }
        if metrics.scroll_top + metrics.client_height > metrics.scroll_height - threshold {
            response.extended_forward = !self.extend_forward(batch).inserted.is_empty();
        }
        response
    }

    /// Feeds one viewport batch to the visibility tracker.
    pub fn observe(&mut self, batch: &ViewportBatch) -> Option<ActiveDayChange> {
        let change = self.tracker.observe(batch, self.windows.window())?;
        self.sink.active_day_changed(&change);
        Some(change)
    }

    /// Pins the active day after a direct interaction inside `offset`.
    pub fn lock_focus(&mut self, offset: DayOffset) -> Option<ActiveDayChange> {
        let change = self.tracker.lock_focus(offset, self.windows.window())?;
        self.sink.active_day_changed(&change);
        Some(change)
    }

    /// Applies new settings to subsequent materializations and tracking.
    pub fn update_config(&mut self, config: TimelineConfig) {
        self.windows.update_config(config.daily_notes.clone());
        self.tracker.set_config(config.tracker_config());
        self.reanchor.set_span(config.initial_span);
        self.config = config;
        info!("event=session_config module=timeline status=ok");
    }

    /// Record of the day the user last interacted with, if still in the window.
    pub fn last_focused(&self) -> Option<&ProviderRecord<P>> {
        let offset = self.tracker.last_focused()?;
        self.windows.window().resolve(offset)
    }

    pub fn active_day(&self) -> Option<ActiveDayChange> {
        self.tracker.active()
    }

    pub fn focus_lock(&self) -> Option<DayOffset> {
        self.tracker.focus_lock()
    }

    pub fn anchor(&self) -> NaiveDate {
        self.windows.anchor()
    }

    pub fn window(&self) -> &OffsetIndex<P::Content, P::Editor> {
        self.windows.window()
    }

    pub fn is_extending(&self) -> bool {
        self.windows.is_extending()
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        self.windows.provider()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn report_failures(&mut self, report: &MaterializeReport) {
        for failure in &report.failures {
            self.sink
                .notice(&format!("Failed to load note for {}: {}", failure.date, failure.error));
        }
    }
}
