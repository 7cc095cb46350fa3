//! Shared fixtures: a router backed by a tempfile database seeded with a
//! `test`/`test` user (id 1), an `other`/`other` user (id 2), and one post
//! authored by `test`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use quill_db::Db;

pub struct TestApp {
    pub router: Router,
    pub db: Db,
    // Holds the tempfile open so the database outlives the test body.
    _file: NamedTempFile,
}

pub fn test_app() -> TestApp {
    let file = NamedTempFile::new().unwrap();
    let db = Db::new(file.path());
    db.init().unwrap();
    seed(&db);

    let state = quill_server::app_state(db.clone(), "test-secret");
    TestApp {
        router: quill_server::app(state),
        db,
        _file: file,
    }
}

pub fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

fn seed(db: &Db) {
    let conn = db.connect().unwrap();
    conn.execute(
        "INSERT INTO user (username, password) VALUES ('test', ?1), ('other', ?2)",
        [hash("test"), hash("other")],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO post (author_id, created, title, body)
         VALUES (1, '2018-01-01 00:00:00', 'test title', 'test body')",
        [],
    )
    .unwrap();
}

pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut req = Request::builder().uri(path).method("GET");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    app: &Router,
    path: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut req = Request::builder()
        .uri(path)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Logs in through the real endpoint and returns the session cookie in
/// `name=value` form, ready for a Cookie header.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = post_form(
        app,
        "/auth/login",
        &format!("username={username}&password={password}"),
        None,
    )
    .await;

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}
