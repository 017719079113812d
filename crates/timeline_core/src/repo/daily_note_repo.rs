//! SQLite daily-note store.
//!
//! # Responsibility
//! - Persist notes keyed by vault-relative path.
//! - Hand out content handles (note ids) and editor handles (session ids).
//! - Track open editor sessions so released days can be verified.
//!
//! # Invariants
//! - `path` is unique; creating an existing path fails instead of overwriting.
//! - Releasing a day closes its editor session but never deletes the note.

use crate::daily_note::config::DailyNoteConfig;
use crate::daily_note::provider::{BindError, ContentProvider, CreationError, NoteLocation};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

/// Stable identifier of a stored note.
pub type NoteId = Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for note store queries outside the provider contract.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(path) => write!(f, "note not found: {path}"),
            Self::InvalidData(message) => write!(f, "invalid stored note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Content handle: one stored note.
///
/// Handles serialize so hosts can park them across their own UI bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    pub note_id: NoteId,
    pub path: String,
}

/// Editor handle: one open editor session on a stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSession {
    pub session_id: Uuid,
    pub note_id: NoteId,
}

/// Daily-note store over a migrated SQLite connection.
pub struct SqliteDailyNoteStore {
    conn: Connection,
}

impl SqliteDailyNoteStore {
    /// Wraps a connection whose schema is already at the latest version.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let version = current_user_version(&conn)?;
        if version != latest_version() {
            return Err(RepoError::InvalidData(format!(
                "note store schema version {version} does not match expected {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }

    /// Opens (and migrates) a store file.
    pub fn open_file(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the note content stored at `path`, if any.
    pub fn load_content(&self, path: &str) -> RepoResult<Option<String>> {
        let content = self
            .conn
            .query_row(
                "SELECT content FROM notes WHERE path = ?1;",
                [path],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(content)
    }

    /// Creates or fully replaces the note at `path`.
    pub fn save(&self, path: &str, content: &str) -> RepoResult<StoredNote> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET content = ?2, updated_at = (strftime('%s', 'now') * 1000)
             WHERE path = ?1;",
            params![path, content],
        )?;
        if changed == 0 {
            return self.insert_note(path, content);
        }
        self.find_note(path)?
            .ok_or_else(|| RepoError::NotFound(path.to_string()))
    }

    /// Returns the content of the daily note for `date`, if it exists.
    pub fn load_day(&self, config: &DailyNoteConfig, date: NaiveDate) -> RepoResult<Option<String>> {
        self.load_content(&config.note_path(date))
    }

    /// Creates or fully replaces the daily note for `date`.
    pub fn save_day(
        &self,
        config: &DailyNoteConfig,
        date: NaiveDate,
        content: &str,
    ) -> RepoResult<StoredNote> {
        self.save(&config.note_path(date), content)
    }

    /// Lists stored note paths in ascending order.
    pub fn list_paths(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT path FROM notes ORDER BY path ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut paths = Vec::new();
        for row in rows {
            paths.push(row?);
        }
        Ok(paths)
    }

    /// Counts editor sessions that have not been released.
    pub fn open_editor_count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM editor_sessions;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative session count {count}")))
    }

    fn find_note(&self, path: &str) -> RepoResult<Option<StoredNote>> {
        let uuid_text = self
            .conn
            .query_row("SELECT uuid FROM notes WHERE path = ?1;", [path], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        match uuid_text {
            Some(text) => Ok(Some(StoredNote {
                note_id: parse_uuid(&text)?,
                path: path.to_string(),
            })),
            None => Ok(None),
        }
    }

    fn insert_note(&self, path: &str, content: &str) -> RepoResult<StoredNote> {
        let note_id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO notes (uuid, path, content) VALUES (?1, ?2, ?3);",
            params![note_id.to_string(), path, content],
        )?;
        Ok(StoredNote {
            note_id,
            path: path.to_string(),
        })
    }
}

impl ContentProvider for SqliteDailyNoteStore {
    type Content = StoredNote;
    type Editor = EditorSession;

    fn exists(&self, note: &NoteLocation) -> Result<bool, CreationError> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM notes WHERE path = ?1);",
                [note.path.as_str()],
                |row| row.get::<_, bool>(0),
            )
            .map_err(|err| lookup_error(&note.path, err))
    }

    fn open(&self, note: &NoteLocation) -> Result<StoredNote, CreationError> {
        match self.find_note(&note.path) {
            Ok(Some(stored)) => Ok(stored),
            Ok(None) => Err(CreationError::Lookup {
                path: note.path.clone(),
                message: "note does not exist".to_string(),
            }),
            Err(err) => Err(lookup_error(&note.path, err)),
        }
    }

    fn create(
        &self,
        note: &NoteLocation,
        initial_content: &str,
    ) -> Result<StoredNote, CreationError> {
        let stored = self
            .insert_note(&note.path, initial_content)
            .map_err(|err| CreationError::Write {
                path: note.path.clone(),
                message: err.to_string(),
            })?;
        debug!(
            "event=note_create module=repo status=ok path={} note_id={}",
            stored.path, stored.note_id
        );
        Ok(stored)
    }

    fn bind_editor(&self, content: &StoredNote) -> Result<EditorSession, BindError> {
        let session_id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO editor_sessions (uuid, note_uuid) VALUES (?1, ?2);",
                params![session_id.to_string(), content.note_id.to_string()],
            )
            .map_err(|err| BindError {
                path: content.path.clone(),
                message: err.to_string(),
            })?;
        Ok(EditorSession {
            session_id,
            note_id: content.note_id,
        })
    }

    fn read_template(&self, path: &str) -> Result<Option<String>, CreationError> {
        self.load_content(path)
            .map_err(|err| lookup_error(path, err))
    }

    fn release(&self, _content: Option<StoredNote>, editor: Option<EditorSession>) {
        let Some(editor) = editor else {
            return;
        };
        if let Err(err) = self.conn.execute(
            "DELETE FROM editor_sessions WHERE uuid = ?1;",
            [editor.session_id.to_string()],
        ) {
            warn!(
                "event=editor_release module=repo status=error session_id={} error={}",
                editor.session_id, err
            );
        }
    }
}

fn lookup_error(path: &str, err: impl Display) -> CreationError {
    CreationError::Lookup {
        path: path.to_string(),
        message: err.to_string(),
    }
}

fn parse_uuid(value: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid note uuid `{value}`")))
}
