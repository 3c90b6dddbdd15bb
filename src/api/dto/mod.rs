//! Wire types, split by endpoint group and re-exported flat so
//! handlers import from one place.

mod auth;
mod common;
mod error;
mod health;
mod reservation;
mod resource;
mod user;

pub use auth::{LoginRequest, RegisterRequest, RegisterResponse, RegisteredUser, TokenResponse};
pub use common::MessageResponse;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use reservation::{CreateReservationRequest, ReservationResponse, UpdateReservationRequest};
pub use resource::{CreateResourceRequest, ResourceResponse, UpdateResourceRequest};
pub use user::{UpdateMeRequest, UserResponse};
