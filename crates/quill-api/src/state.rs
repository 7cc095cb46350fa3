use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use quill_db::Db;

#[derive(Clone)]
pub struct AppState(pub Arc<AppStateInner>);

impl std::ops::Deref for AppState {
    type Target = AppStateInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct AppStateInner {
    /// Database handle; each request opens its own connection from it.
    pub db: Db,
    /// Key for signing session cookies, derived from the configured secret.
    pub key: Key,
}

// Lets SignedCookieJar pull its signing key out of the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}
