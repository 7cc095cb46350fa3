use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{Post, User};
use crate::DbError;

// -- Users --

/// Inserts a user and returns the new row id. A taken username surfaces as
/// [`DbError::Duplicate`].
pub fn create_user(conn: &Connection, username: &str, password_hash: &str) -> Result<i64, DbError> {
    conn.execute(
        "INSERT INTO user (username, password) VALUES (?1, ?2)",
        params![username, password_hash],
    )
    .map_err(DbError::from_sqlite)?;

    Ok(conn.last_insert_rowid())
}

pub fn user_by_username(conn: &Connection, username: &str) -> Result<Option<User>, DbError> {
    let row = conn
        .query_row(
            "SELECT id, username, password FROM user WHERE username = ?1",
            [username],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(row)
}

pub fn user_by_id(conn: &Connection, id: i64) -> Result<Option<User>, DbError> {
    let row = conn
        .query_row(
            "SELECT id, username, password FROM user WHERE id = ?1",
            [id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(row)
}

// -- Posts --

/// All posts, newest first. JOINs `user` so the listing carries the author
/// username in a single query. Ties on `created` (second granularity) break
/// by descending id.
pub fn list_posts(conn: &Connection) -> Result<Vec<Post>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.author_id, u.username, p.created, p.title, p.body
         FROM post p
         JOIN user u ON p.author_id = u.id
         ORDER BY p.created DESC, p.id DESC",
    )?;

    let rows = stmt
        .query_map([], map_post)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn get_post(conn: &Connection, id: i64) -> Result<Option<Post>, DbError> {
    let row = conn
        .query_row(
            "SELECT p.id, p.author_id, u.username, p.created, p.title, p.body
             FROM post p
             JOIN user u ON p.author_id = u.id
             WHERE p.id = ?1",
            [id],
            map_post,
        )
        .optional()?;

    Ok(row)
}

pub fn create_post(conn: &Connection, author_id: i64, title: &str, body: &str) -> Result<i64, DbError> {
    conn.execute(
        "INSERT INTO post (author_id, title, body) VALUES (?1, ?2, ?3)",
        params![author_id, title, body],
    )
    .map_err(DbError::from_sqlite)?;

    Ok(conn.last_insert_rowid())
}

pub fn update_post(conn: &Connection, id: i64, title: &str, body: &str) -> Result<(), DbError> {
    conn.execute(
        "UPDATE post SET title = ?1, body = ?2 WHERE id = ?3",
        params![title, body, id],
    )
    .map_err(DbError::from_sqlite)?;

    Ok(())
}

pub fn delete_post(conn: &Connection, id: i64) -> Result<(), DbError> {
    conn.execute("DELETE FROM post WHERE id = ?1", [id])
        .map_err(DbError::from_sqlite)?;

    Ok(())
}

fn map_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        author_id: row.get(1)?,
        author: row.get(2)?,
        created: row.get(3)?,
        title: row.get(4)?,
        body: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}
