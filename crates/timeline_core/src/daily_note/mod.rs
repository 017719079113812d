//! Daily note plumbing.
//!
//! # Responsibility
//! - Derive note locations (folder + formatted filename) from dates.
//! - Render note templates with date placeholders.
//! - Define the content-provider contract that external note owners satisfy.
//!
//! # Invariants
//! - Configuration is passed explicitly; no module-level mutable settings.
//! - Every per-day provider failure is typed as `CreationError` or `BindError`.

pub mod config;
pub mod format;
pub mod provider;
pub mod template;
