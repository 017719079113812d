//! Active-day tracking from viewport telemetry.
//!
//! # Responsibility
//! - Pick the materialized day whose top edge is closest to the viewport top.
//! - Pin the active day to an explicitly focused day until it leaves view.
//! - Emit one change per distinct active day.
//!
//! # Invariants
//! - The tracker never mutates the window; it only resolves offsets in it.
//! - Visibility is taken per batch as reported; there is no debouncing.
//! - A change is returned only when the active offset actually changes.

use crate::model::day::{ActiveDayChange, DayOffset};
use crate::timeline::offset_index::OffsetIndex;
use log::debug;

/// Position report for one rendered day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySample {
    pub offset: DayOffset,
    /// Whether any part of the day intersects the viewport.
    pub visible: bool,
    /// Signed distance of the day's top edge below the viewport top, in px.
    /// Negative when the day started above the viewport.
    pub top: f64,
}

/// One observation delivered by the host on scroll or layout change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportBatch {
    /// Viewport height in px, when the host knows it.
    pub viewport_height: Option<f64>,
    pub samples: Vec<VisibilitySample>,
}

impl ViewportBatch {
    pub fn new(viewport_height: Option<f64>) -> Self {
        Self {
            viewport_height,
            samples: Vec::new(),
        }
    }

    /// Appends a sample and returns the batch for chaining.
    pub fn sample(mut self, offset: DayOffset, visible: bool, top: f64) -> Self {
        self.samples.push(VisibilitySample {
            offset,
            visible,
            top,
        });
        self
    }

    fn reports_visible(&self, offset: DayOffset) -> bool {
        self.samples
            .iter()
            .any(|sample| sample.offset == offset && sample.visible)
    }
}

/// Size of the band below the viewport top in which a day may become active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Fraction of the viewport height.
    pub top_band_ratio: f64,
    /// Band height used when the batch carries no viewport height.
    pub fallback_band_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            top_band_ratio: 0.1,
            fallback_band_px: 200.0,
        }
    }
}

/// Focus-lock aware active-day state machine.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    config: TrackerConfig,
    active: Option<ActiveDayChange>,
    focus_lock: Option<DayOffset>,
    last_focused: Option<DayOffset>,
}

impl VisibilityTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn set_config(&mut self, config: TrackerConfig) {
        self.config = config;
    }

    pub fn active(&self) -> Option<ActiveDayChange> {
        self.active
    }

    pub fn focus_lock(&self) -> Option<DayOffset> {
        self.focus_lock
    }

    /// Last offset the user explicitly focused; survives lock release.
    pub fn last_focused(&self) -> Option<DayOffset> {
        self.last_focused
    }

    /// Processes one viewport batch.
    ///
    /// Returns the new active day when it changed.
    pub fn observe<C, E>(
        &mut self,
        batch: &ViewportBatch,
        window: &OffsetIndex<C, E>,
    ) -> Option<ActiveDayChange> {
        if let Some(locked) = self.focus_lock {
            if batch.reports_visible(locked) {
                return None;
            }
            debug!(
                "event=focus_lock module=timeline status=ok action=release offset={}",
                locked
            );
            self.focus_lock = None;
        }

        let band = self.top_band(batch);
        let mut best: Option<(DayOffset, f64)> = None;
        for sample in &batch.samples {
            if !sample.visible || !sample.top.is_finite() || sample.top >= band {
                continue;
            }
            if !window.contains(sample.offset) {
                continue;
            }
            let distance = sample.top.abs();
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((sample.offset, distance));
            }
        }

        let (offset, _) = best?;
        let record = window.resolve(offset)?;
        self.activate(ActiveDayChange {
            offset,
            date: record.date(),
        })
    }

    /// Pins the active day to `offset` after a direct user interaction.
    ///
    /// Ignored when `offset` is not materialized. Returns the new active day
    /// when it changed.
    pub fn lock_focus<C, E>(
        &mut self,
        offset: DayOffset,
        window: &OffsetIndex<C, E>,
    ) -> Option<ActiveDayChange> {
        let record = window.resolve(offset)?;
        self.focus_lock = Some(offset);
        self.last_focused = Some(offset);
        debug!(
            "event=focus_lock module=timeline status=ok action=lock offset={}",
            offset
        );

        let change = ActiveDayChange {
            offset,
            date: record.date(),
        };
        if self.active.map(|active| active.date) == Some(change.date) {
            self.active = Some(change);
            return None;
        }
        self.active = Some(change);
        Some(change)
    }

    /// Forgets all visibility state and makes `change` the active day.
    ///
    /// Used after a rebuild, where prior offsets no longer name the same days.
    pub fn reset_to(&mut self, change: ActiveDayChange) -> ActiveDayChange {
        self.focus_lock = None;
        self.last_focused = None;
        self.active = Some(change);
        change
    }

    /// Forgets all visibility state.
    pub fn clear(&mut self) {
        self.focus_lock = None;
        self.last_focused = None;
        self.active = None;
    }

    fn activate(&mut self, change: ActiveDayChange) -> Option<ActiveDayChange> {
        if self.active.map(|active| active.offset) == Some(change.offset) {
            return None;
        }
        self.active = Some(change);
        Some(change)
    }

    fn top_band(&self, batch: &ViewportBatch) -> f64 {
        match batch.viewport_height {
            Some(height) if height.is_finite() && height > 0.0 => {
                height * self.config.top_band_ratio
            }
            _ => self.config.fallback_band_px,
        }
    }
}
