//! Content-provider contract and per-day error taxonomy.
//!
//! # Responsibility
//! - Describe what the core needs from the external owner of note documents.
//! - Type the per-day failures that degrade a single record.
//!
//! # Invariants
//! - Provider failures are never fatal to the timeline; callers degrade the
//!   affected day only.
//! - Handles returned by the provider are given back through `release`.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Where a daily note lives, as derived from `DailyNoteConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteLocation {
    pub date: NaiveDate,
    /// Vault-relative path, e.g. `journal/2025-06-15.md`.
    pub path: String,
}

/// Note could not be looked up, read, or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    /// Existence check or read-back failed.
    Lookup { path: String, message: String },
    /// Writing the new note failed.
    Write { path: String, message: String },
}

impl CreationError {
    pub fn path(&self) -> &str {
        match self {
            Self::Lookup { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

impl Display for CreationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup { path, message } => {
                write!(f, "failed to load daily note `{path}`: {message}")
            }
            Self::Write { path, message } => {
                write!(f, "failed to create daily note `{path}`: {message}")
            }
        }
    }
}

impl Error for CreationError {}

/// Editor could not attach to an acquired note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    pub path: String,
    pub message: String,
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to attach editor to `{}`: {}",
            self.path, self.message
        )
    }
}

impl Error for BindError {}

/// Any per-day materialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayError {
    Creation(CreationError),
    Bind(BindError),
}

impl Display for DayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creation(err) => write!(f, "{err}"),
            Self::Bind(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Creation(err) => Some(err),
            Self::Bind(err) => Some(err),
        }
    }
}

impl From<CreationError> for DayError {
    fn from(value: CreationError) -> Self {
        Self::Creation(value)
    }
}

impl From<BindError> for DayError {
    fn from(value: BindError) -> Self {
        Self::Bind(value)
    }
}

/// External owner of daily-note documents and their editors.
///
/// All calls happen on the host's UI thread; implementations may use
/// interior mutability for bookkeeping.
pub trait ContentProvider {
    /// Opaque reference to an editable note document.
    type Content: Debug;
    /// Opaque reference to an editor bound to a note document.
    type Editor: Debug;

    /// Returns whether a note already exists at `note.path`.
    fn exists(&self, note: &NoteLocation) -> Result<bool, CreationError>;

    /// Acquires an existing note.
    fn open(&self, note: &NoteLocation) -> Result<Self::Content, CreationError>;

    /// Creates a note with the given initial content and acquires it.
    fn create(
        &self,
        note: &NoteLocation,
        initial_content: &str,
    ) -> Result<Self::Content, CreationError>;

    /// Attaches an editor to an acquired note.
    fn bind_editor(&self, content: &Self::Content) -> Result<Self::Editor, BindError>;

    /// Reads a template document. `Ok(None)` when no document exists at `path`.
    fn read_template(&self, path: &str) -> Result<Option<String>, CreationError>;

    /// Gives handles back to the owner once a day leaves the window.
    fn release(&self, content: Option<Self::Content>, editor: Option<Self::Editor>);
}
