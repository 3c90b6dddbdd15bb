//! Business rules live here. Services validate input, consult the
//! [`crate::policy`] module for authorization and drive the
//! repositories; handlers stay thin.

mod auth_service;
mod reservation_service;
mod resource_service;
mod user_service;

pub use auth_service::{AuthService, IssuedToken};
pub use reservation_service::ReservationService;
pub use resource_service::ResourceService;
pub use user_service::UserService;

use crate::config::JwtSettings;
use crate::repositories::Repositories;

/// Service bundle stored in the application state.
///
/// Cheap to clone; every member is backed by the same pool.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub resources: ResourceService,
    pub reservations: ReservationService,
}

impl Services {
    /// Builds the full service set on top of `repos`. The JWT settings
    /// go to [`AuthService`], which signs and verifies tokens.
    pub fn new(repos: Repositories, jwt: JwtSettings) -> Self {
        let Repositories { users, resources, reservations } = repos;
        Self {
            auth: AuthService::new(users.clone(), jwt),
            users: UserService::new(users),
            resources: ResourceService::new(resources.clone()),
            reservations: ReservationService::new(reservations, resources),
        }
    }
}
