use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Extension, Form,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use tracing::{error, info};

use quill_db::{DbError, RequestConn, queries};

use crate::{error::AppError, middleware::CurrentUser, pages, session};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn register_form(Extension(user): Extension<Option<CurrentUser>>) -> Html<String> {
    Html(pages::register(user.as_ref(), None))
}

/// Validates, hashes the password, and inserts the user. A taken username is
/// detected by the UNIQUE constraint rather than a racy pre-check.
pub async fn register(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    if let Some(message) = validate(&form) {
        return Ok(Html(pages::register(user.as_ref(), Some(message))).into_response());
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(form.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("password hashing failed: {e}");
            AppError::Internal
        })?
        .to_string();

    match conn.with(|conn| queries::create_user(conn, &form.username, &password_hash)) {
        Ok(_) => {
            info!(username = %form.username, "user registered");
            Ok(Redirect::to("/auth/login").into_response())
        }
        Err(DbError::Duplicate) => {
            let message = format!("User {} is already registered.", form.username);
            Ok(Html(pages::register(user.as_ref(), Some(&message))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(Extension(user): Extension<Option<CurrentUser>>) -> Html<String> {
    Html(pages::login(user.as_ref(), None))
}

pub async fn login(
    Extension(conn): Extension<RequestConn>,
    Extension(current): Extension<Option<CurrentUser>>,
    jar: SignedCookieJar,
    Form(form): Form<Credentials>,
) -> Result<Response, AppError> {
    let user = match conn.with(|conn| queries::user_by_username(conn, &form.username))? {
        Some(user) => user,
        None => {
            return Ok(
                Html(pages::login(current.as_ref(), Some("Incorrect username."))).into_response(),
            );
        }
    };

    let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
        error!("stored password hash failed to parse: {e}");
        AppError::Internal
    })?;
    if Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(
            Html(pages::login(current.as_ref(), Some("Incorrect password."))).into_response(),
        );
    }

    info!(username = %user.username, "user logged in");
    Ok((session::log_in(jar, user.id), Redirect::to("/")).into_response())
}

/// Clears the session. No precondition; logging out twice is fine.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    (session::log_out(jar), Redirect::to("/"))
}

fn validate(form: &Credentials) -> Option<&'static str> {
    if form.username.is_empty() {
        Some("Username is required.")
    } else if form.password.is_empty() {
        Some("Password is required.")
    } else {
        None
    }
}
