use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::SignedCookieJar;
use serde::Serialize;

use quill_db::{RequestConn, models::User, queries};

use crate::{error::AppError, session, state::AppState};

/// The authenticated user for the current request, resolved from the
/// session cookie and attached as a request extension.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Runs before every request. Stashes the request's [`RequestConn`] as an
/// extension so every downstream storage access shares one lazily-opened
/// connection, then resolves the acting user. No session, or a session
/// whose user id no longer resolves to a row, means the acting user is
/// anonymous; neither is a failure.
pub async fn load_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let conn = RequestConn::new(state.db.clone());

    let user = match session::user_id(&jar) {
        None => None,
        Some(id) => conn
            .with(|conn| queries::user_by_id(conn, id))?
            .map(CurrentUser::from),
    };

    req.extensions_mut().insert(conn);
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
