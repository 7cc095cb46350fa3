pub mod error;
pub mod models;
pub mod queries;
pub mod schema;

pub use error::DbError;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;
use tracing::info;

/// Handle to the database file. Holds only the path; each request opens its
/// own connection via [`Db::connect`] and closes it by dropping it.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection to the database file, creating the file if it does
    /// not exist yet. Cross-request coordination is left to SQLite's own
    /// locking; we only set a busy timeout and enforce foreign keys.
    pub fn connect(&self) -> Result<Connection, DbError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_millis(5_000))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    /// (Re)initializes the schema. Destructive: existing `user` and `post`
    /// tables are dropped first.
    pub fn init(&self) -> Result<(), DbError> {
        let conn = self.connect()?;
        schema::create_all(&conn)?;
        info!("database initialized at {}", self.path.display());
        Ok(())
    }
}

/// The one connection a request uses. Opened lazily on first storage access,
/// cached for the remainder of the request, and closed when the last clone
/// drops at request teardown, handler failure included.
#[derive(Clone)]
pub struct RequestConn {
    db: Db,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl RequestConn {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether the connection has been opened yet.
    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Runs `f` against the request's connection, opening it on first use.
    pub fn with<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut slot = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        let conn = match &mut *slot {
            Some(conn) => conn,
            empty @ None => empty.insert(self.db.connect()?),
        };
        f(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_conn_opens_lazily_and_is_cached() {
        let conn = RequestConn::new(Db::new(":memory:"));
        assert!(!conn.is_open());

        conn.with(|conn| -> Result<(), DbError> {
            conn.execute("CREATE TEMP TABLE scratch (x INTEGER)", [])?;
            Ok(())
        })
        .unwrap();
        assert!(conn.is_open());

        // Temp tables are connection-local: still seeing it proves the
        // second access reused the first connection instead of opening
        // another.
        let count = scratch_tables(&conn);
        assert_eq!(count, 1);
    }

    #[test]
    fn request_conn_clones_share_one_connection() {
        let conn = RequestConn::new(Db::new(":memory:"));
        conn.with(|conn| -> Result<(), DbError> {
            conn.execute("CREATE TEMP TABLE scratch (x INTEGER)", [])?;
            Ok(())
        })
        .unwrap();

        let clone = conn.clone();
        assert!(clone.is_open());
        assert_eq!(scratch_tables(&clone), 1);
    }

    fn scratch_tables(conn: &RequestConn) -> i64 {
        conn.with(|conn| -> Result<i64, DbError> {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM sqlite_temp_master WHERE name = 'scratch'",
                [],
                |row| row.get(0),
            )?)
        })
        .unwrap()
    }
}
