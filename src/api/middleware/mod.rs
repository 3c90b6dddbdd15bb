//! Request-path middleware: request IDs, structured logging, bearer
//! authentication and the [`AppError`](crate::error::AppError)
//! renderer.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::require_auth;
pub use logging::log_request;
pub use request_id::{RequestId, assign_request_id};
