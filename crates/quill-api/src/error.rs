use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

use quill_db::DbError;

use crate::pages;

/// Request-aborting errors. Validation and credential failures are not
/// errors at this level; handlers recover those locally by re-rendering the
/// form with a message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("forbidden")]
    Forbidden,

    /// Anonymous request to a page that needs a user; sent to the login form.
    #[error("login required")]
    LoginRequired,

    #[error(transparent)]
    Db(#[from] DbError),

    /// Password hashing failed; carries no detail past the log.
    #[error("internal error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Html(pages::error_page(404, &msg))).into_response()
            }
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                Html(pages::error_page(403, "You can only modify your own posts.")),
            )
                .into_response(),
            AppError::LoginRequired => Redirect::to("/auth/login").into_response(),
            AppError::Db(e) => {
                error!("database error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
