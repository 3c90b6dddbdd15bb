//! Reservo is a resource reservation service: users register, browse
//! bookable resources and place reservations against them through a
//! JSON HTTP API.
//!
//! The binary in `main.rs` wires [`cli`], [`config`] and [`server`]
//! together; everything else hangs off the router built in [`api`].

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

/// Package version as recorded by `shadow-rs` at build time.
pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
