//! Server-rendered pages. Templates are embedded at build time and rendered
//! through tera; the `.html` names keep tera's autoescaping on, so user data
//! never reaches the page unescaped.

use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use quill_db::models::Post;

use crate::middleware::CurrentUser;

static TERA: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates([
        ("base.html", include_str!("../templates/base.html")),
        ("blog/index.html", include_str!("../templates/blog/index.html")),
        ("blog/create.html", include_str!("../templates/blog/create.html")),
        ("blog/update.html", include_str!("../templates/blog/update.html")),
        ("auth/register.html", include_str!("../templates/auth/register.html")),
        ("auth/login.html", include_str!("../templates/auth/login.html")),
        ("error.html", include_str!("../templates/error.html")),
    ])
    .expect("embedded templates should parse");
    tera
});

/// What a template sees of a post. `created` is trimmed to the date part.
#[derive(Serialize)]
struct PostView<'a> {
    id: i64,
    author_id: i64,
    author: &'a str,
    created: &'a str,
    title: &'a str,
    body: &'a str,
}

impl<'a> From<&'a Post> for PostView<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            author: &post.author,
            created: post.created.get(..10).unwrap_or(&post.created),
            title: &post.title,
            body: &post.body,
        }
    }
}

fn base_context(user: Option<&CurrentUser>, flash: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("user", &user);
    context.insert("flash", &flash);
    context
}

fn render(name: &str, context: &Context) -> String {
    TERA.render(name, context).unwrap_or_else(|e| {
        error!("template {name} failed to render: {e}");
        "<!doctype html><html><body><p>Internal Server Error</p></body></html>".into()
    })
}

pub fn index(user: Option<&CurrentUser>, posts: &[Post]) -> String {
    let mut context = base_context(user, None);
    let posts: Vec<PostView<'_>> = posts.iter().map(PostView::from).collect();
    context.insert("posts", &posts);
    render("blog/index.html", &context)
}

pub fn register(user: Option<&CurrentUser>, flash: Option<&str>) -> String {
    render("auth/register.html", &base_context(user, flash))
}

pub fn login(user: Option<&CurrentUser>, flash: Option<&str>) -> String {
    render("auth/login.html", &base_context(user, flash))
}

pub fn create(user: Option<&CurrentUser>, flash: Option<&str>, title: &str, body: &str) -> String {
    let mut context = base_context(user, flash);
    context.insert("title", title);
    context.insert("body", body);
    render("blog/create.html", &context)
}

pub fn update(
    user: Option<&CurrentUser>,
    flash: Option<&str>,
    post: &Post,
    title: &str,
    body: &str,
) -> String {
    let mut context = base_context(user, flash);
    context.insert("post", &PostView::from(post));
    context.insert("title", title);
    context.insert("body", body);
    render("blog/update.html", &context)
}

pub fn error_page(status: u16, message: &str) -> String {
    let mut context = base_context(None, None);
    context.insert("status", &status);
    context.insert("message", message);
    render("error.html", &context)
}
