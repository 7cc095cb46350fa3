pub mod auth;
pub mod blog;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod session;
pub mod state;

pub use error::AppError;
pub use middleware::CurrentUser;
pub use state::{AppState, AppStateInner};
