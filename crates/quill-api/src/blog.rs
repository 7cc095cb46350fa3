use axum::{
    Extension, Form,
    extract::Path,
    response::{Html, IntoResponse, Redirect, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use quill_db::{RequestConn, models::Post, queries};

use crate::{error::AppError, middleware::CurrentUser, pages};

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// The public index: every post, newest first.
pub async fn index(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
) -> Result<Html<String>, AppError> {
    let posts = conn.with(|conn| queries::list_posts(conn))?;
    Ok(Html(pages::index(user.as_ref(), &posts)))
}

pub async fn create_form(
    Extension(user): Extension<Option<CurrentUser>>,
) -> Result<Html<String>, AppError> {
    let user = user.ok_or(AppError::LoginRequired)?;
    Ok(Html(pages::create(Some(&user), None, "", "")))
}

pub async fn create(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let user = user.ok_or(AppError::LoginRequired)?;

    if form.title.is_empty() {
        let page = pages::create(Some(&user), Some("Title is required."), &form.title, &form.body);
        return Ok(Html(page).into_response());
    }

    conn.with(|conn| queries::create_post(conn, user.id, &form.title, &form.body))?;
    Ok(Redirect::to("/").into_response())
}

pub async fn update_form(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let user = user.ok_or(AppError::LoginRequired)?;
    let post = conn.with(|conn| owned_post(conn, id, &user))?;

    let page = pages::update(Some(&user), None, &post, &post.title, &post.body);
    Ok(Html(page))
}

pub async fn update(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let user = user.ok_or(AppError::LoginRequired)?;
    let post = conn.with(|conn| owned_post(conn, id, &user))?;

    if form.title.is_empty() {
        let page = pages::update(Some(&user), Some("Title is required."), &post, &form.title, &form.body);
        return Ok(Html(page).into_response());
    }

    conn.with(|conn| queries::update_post(conn, post.id, &form.title, &form.body))?;
    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    Extension(conn): Extension<RequestConn>,
    Extension(user): Extension<Option<CurrentUser>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let user = user.ok_or(AppError::LoginRequired)?;
    let post = conn.with(|conn| owned_post(conn, id, &user))?;

    conn.with(|conn| queries::delete_post(conn, post.id))?;
    Ok(Redirect::to("/"))
}

/// Loads a post and checks ownership. Unknown ids abort 404; someone else's
/// post aborts 403, so edits never leak to non-owners.
fn owned_post(conn: &Connection, id: i64, user: &CurrentUser) -> Result<Post, AppError> {
    let post = queries::get_post(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Post id {id} doesn't exist.")))?;

    if post.author_id != user.id {
        return Err(AppError::Forbidden);
    }

    Ok(post)
}
