//! SQLite storage for the reference daily-note store.
//!
//! # Responsibility
//! - Open and configure note store connections.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No note is read or written before migrations succeed.
//! - Errors raised while opening a store name the store they came from.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Location label used for in-memory stores.
pub const IN_MEMORY_LOCATION: &str = ":memory:";

pub type DbResult<T> = Result<T, DbError>;

/// Note store failure.
#[derive(Debug)]
pub enum DbError {
    /// The store file could not be opened at all.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// The store was written by a newer build.
    UnsupportedSchemaVersion {
        location: Option<String>,
        db_version: u32,
        latest_supported: u32,
    },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Store file (or `:memory:`) the error refers to, when known.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Open { location, .. } => Some(location),
            Self::UnsupportedSchemaVersion { location, .. } => location.as_deref(),
            Self::Sqlite(_) => None,
        }
    }

    /// Attaches `location` where the variant carries one and it is unset.
    pub(crate) fn at(self, at: &str) -> Self {
        match self {
            Self::UnsupportedSchemaVersion {
                location: None,
                db_version,
                latest_supported,
            } => Self::UnsupportedSchemaVersion {
                location: Some(at.to_string()),
                db_version,
                latest_supported,
            },
            other => other,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open note store `{location}`: {source}")
            }
            Self::UnsupportedSchemaVersion {
                location,
                db_version,
                latest_supported,
            } => {
                write!(f, "note store ")?;
                if let Some(location) = location {
                    write!(f, "`{location}` ")?;
                }
                write!(
                    f,
                    "has schema version {db_version}; this build supports up to {latest_supported}"
                )
            }
            Self::Sqlite(err) => write!(f, "note store query failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
