use thiserror::Error;

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// An insert violated a UNIQUE constraint (duplicate username).
    #[error("value already exists")]
    Duplicate,

    /// The request connection's lock was poisoned by a panicking holder.
    #[error("connection lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// Maps a UNIQUE-constraint failure to [`DbError::Duplicate`] so callers
    /// can tell "taken username" apart from real storage failures.
    pub(crate) fn from_sqlite(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                DbError::Duplicate
            }
            _ => DbError::Sqlite(err),
        }
    }
}
