//! Infinite-scroll timeline core.
//!
//! # Responsibility
//! - Offset index: day offset -> record, date derivation.
//! - Window manager: contiguous window, guarded extension, rebuild.
//! - Visibility tracker: active day from viewport batches, focus lock.
//! - Re-anchor controller: jump to a date or to today.
//! - Session: the facade a host embeds.
//!
//! # Invariants
//! - Everything runs on the host's single UI thread.
//! - Only the window manager mutates the window.

pub mod clock;
pub mod config;
pub mod error;
pub mod offset_index;
pub mod reanchor;
pub mod session;
pub mod visibility;
pub mod window;
