//! Timeline session configuration.
//!
//! Hosts persist settings themselves and hand this struct to the session on
//! construction and on every settings change.

use crate::daily_note::config::DailyNoteConfig;
use crate::timeline::reanchor::DaySpan;
use crate::timeline::visibility::TrackerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub daily_notes: DailyNoteConfig,
    /// Window built on open and on every jump.
    pub initial_span: DaySpan,
    /// Days added per scroll-triggered extension.
    pub extension_batch: usize,
    /// Distance from either scroll edge that triggers an extension, in px.
    pub load_more_threshold_px: f64,
    /// Fraction of the viewport height in which a day may become active.
    pub top_band_ratio: f64,
    /// Active band height when the host reports no viewport height, in px.
    pub fallback_band_px: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let tracker = TrackerConfig::default();
        Self {
            daily_notes: DailyNoteConfig::default(),
            initial_span: DaySpan::default(),
            extension_batch: 3,
            load_more_threshold_px: 500.0,
            top_band_ratio: tracker.top_band_ratio,
            fallback_band_px: tracker.fallback_band_px,
        }
    }
}

impl TimelineConfig {
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            top_band_ratio: self.top_band_ratio,
            fallback_band_px: self.fallback_band_px,
        }
    }
}
