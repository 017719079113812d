//! Daily note configuration and location derivation.
//!
//! # Invariants
//! - Folder `""` or `"/"` places notes at the vault root.
//! - Leading/trailing slashes in `folder` never leak into note paths.
//! - A blank `template_path` is treated as "no template".

use super::format::{format_date, DEFAULT_DATE_FORMAT};
use super::provider::NoteLocation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const NOTE_EXTENSION: &str = "md";

/// Where daily notes live and how new ones are seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyNoteConfig {
    /// Vault-relative folder for daily notes.
    pub folder: String,
    /// Moment-style filename pattern, e.g. `YYYY-MM-DD`.
    pub date_format: String,
    /// Optional vault-relative path of a template note.
    pub template_path: Option<String>,
}

impl Default for DailyNoteConfig {
    fn default() -> Self {
        Self {
            folder: String::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            template_path: None,
        }
    }
}

impl DailyNoteConfig {
    /// Returns the note filename for `date`, e.g. `2025-06-15.md`.
    pub fn filename_for(&self, date: NaiveDate) -> String {
        format!(
            "{}.{NOTE_EXTENSION}",
            format_date(date, self.date_format.as_str())
        )
    }

    /// Returns the vault-relative note path for `date`.
    pub fn note_path(&self, date: NaiveDate) -> String {
        let filename = self.filename_for(date);
        match self.clean_folder() {
            Some(folder) => format!("{folder}/{filename}"),
            None => filename,
        }
    }

    pub fn location(&self, date: NaiveDate) -> NoteLocation {
        NoteLocation {
            date,
            path: self.note_path(date),
        }
    }

    /// Returns the configured template path, or `None` when blank.
    pub fn template_path(&self) -> Option<&str> {
        self.template_path
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn clean_folder(&self) -> Option<&str> {
        let cleaned = self.folder.trim().trim_matches('/');
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}
