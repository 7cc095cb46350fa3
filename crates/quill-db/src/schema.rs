use rusqlite::Connection;

use crate::DbError;

/// Drops and recreates all tables. `post` goes first so the foreign key to
/// `user` never dangles mid-batch.
pub fn create_all(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS post;
        DROP TABLE IF EXISTS user;

        CREATE TABLE user (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            username  TEXT UNIQUE NOT NULL,
            password  TEXT NOT NULL
        );

        CREATE TABLE post (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id  INTEGER NOT NULL,
            created    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            title      TEXT NOT NULL,
            body       TEXT,
            FOREIGN KEY (author_id) REFERENCES user (id)
        );
        ",
    )?;

    Ok(())
}
