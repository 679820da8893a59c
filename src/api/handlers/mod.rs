//! HTTP request handlers.

pub mod user_handler;

pub use user_handler::{account_routes, user_routes};
