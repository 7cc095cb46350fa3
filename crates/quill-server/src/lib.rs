use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use quill_api::{AppState, AppStateInner, auth, blog, session};
use quill_db::Db;

/// Server configuration, read from the environment with development
/// defaults. `QUILL_SECRET_KEY` and `QUILL_DB_PATH` are the two knobs tests
/// override for isolation.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret_key: std::env::var("QUILL_SECRET_KEY").unwrap_or_else(|_| "dev".into()),
            db_path: std::env::var("QUILL_DB_PATH").unwrap_or_else(|_| "quill.sqlite".into()),
            host: std::env::var("QUILL_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: std::env::var("QUILL_PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()?,
        })
    }
}

/// Builds the shared state: the database handle and the cookie signing key.
pub fn app_state(db: Db, secret_key: &str) -> AppState {
    AppState(Arc::new(AppStateInner {
        db,
        key: session::signing_key(secret_key),
    }))
}

/// Assembles the full router. Every route runs behind the current-user
/// middleware, so handlers always see an `Option<CurrentUser>` extension.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(blog::index))
        .route("/hello", get(hello))
        .route("/auth/register", get(auth::register_form).post(auth::register))
        .route("/auth/login", get(auth::login_form).post(auth::login))
        .route("/auth/logout", get(auth::logout))
        .route("/create", get(blog::create_form).post(blog::create))
        .route("/{id}/update", get(blog::update_form).post(blog::update))
        .route("/{id}/delete", post(blog::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            quill_api::middleware::load_user,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Smoke-test endpoint.
async fn hello() -> &'static str {
    "hello, world!"
}
