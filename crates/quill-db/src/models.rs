/// Database row types — these map directly to SQLite rows.

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string, never the plaintext password.
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    /// Username joined from the `user` table.
    pub author: String,
    pub created: String,
    pub title: String,
    pub body: String,
}
