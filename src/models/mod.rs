mod reservation;
mod resource;
mod user;

pub use reservation::{NewReservation, Reservation, ReservationStatus, UpdateReservation};
pub use resource::{NewResource, Resource, UpdateResource};
pub use user::{NewUser, UpdateUser, User};
