//! Shared application state handed to every request handler.

use crate::{
    config::JwtSettings, db::AsyncDbPool, repositories::Repositories, services::Services,
};

/// State behind axum's `State` extractor. Cloning is cheap; services
/// and the pool share their backing `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Business logic, one service per entity.
    pub services: Services,
    /// Raw pool access for health probes.
    pub db_pool: AsyncDbPool,
    /// Token settings used by the auth middleware.
    pub jwt: JwtSettings,
}

impl AppState {
    /// Wires repositories and services on top of `pool`.
    pub fn new(pool: AsyncDbPool, jwt: JwtSettings) -> Self {
        let services = Services::new(Repositories::new(pool.clone()), jwt.clone());
        Self { services, db_pool: pool, jwt }
    }
}
