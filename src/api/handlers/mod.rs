//! Request handlers, one module per endpoint group.

pub mod auth;
pub mod health;
pub mod hello;
pub mod me;
pub mod reservations;
pub mod resources;
pub mod users;
