//! The crate-wide error type and the diesel-to-domain error bridge.

mod app_error;
pub mod constraint_parser;
mod diesel_errors;

pub use app_error::{AppError, AppResult, ValidationFieldError};
