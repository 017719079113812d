//! Window-level error types.

use crate::model::day::DayOffset;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected window rebuild request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// `min` is greater than `max`.
    InvalidRange { min: DayOffset, max: DayOffset },
}

impl Display for WindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { min, max } => {
                write!(f, "invalid window range: min {min} is greater than max {max}")
            }
        }
    }
}

impl Error for WindowError {}

/// Extension request rejected by the single-flight guard.
///
/// Internal signal only: the one-shot extension APIs drop the request and
/// log it instead of surfacing it to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionConflict {
    /// Generation of the window the in-flight extension targets.
    pub in_flight_generation: u64,
}

impl Display for ExtensionConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "extension already in flight for window generation {}",
            self.in_flight_generation
        )
    }
}

impl Error for ExtensionConflict {}
