//! HTTP surface: routers, handlers, middleware and wire types.

mod doc;

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
