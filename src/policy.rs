//! Authorization Policy
//!
//! Central gate for every role- and ownership-restricted operation.
//! Services call [`authorize`] before touching the database so the
//! denial messages stay uniform across handlers.

use crate::error::{AppError, AppResult};
use crate::models::{Reservation, User};

/// An operation a caller wants to perform, together with the record it
/// targets when ownership matters.
#[derive(Clone, Copy, Debug)]
pub enum Action<'a> {
    ViewReservation(&'a Reservation),
    UpdateReservation(&'a Reservation),
    DeleteReservation(&'a Reservation),
    CreateResource,
    UpdateResource,
    DeleteResource,
    ListUsers,
    ShowUser,
    DeleteUser,
}

/// Checks whether `caller` may perform `action`.
///
/// Reservations are visible to their owner and to admins. Resource
/// management and the user directory are admin only. Denials carry the
/// exact message the API returns to the client.
pub fn authorize(caller: &User, action: Action<'_>) -> AppResult<()> {
    match action {
        Action::ViewReservation(reservation) => deny_unless_owner_or_admin(
            caller,
            reservation,
            "Nincs jogosultságod megtekinteni ezt a foglalást!",
        ),
        Action::UpdateReservation(reservation) => deny_unless_owner_or_admin(
            caller,
            reservation,
            "Nincs jogosultságod módosítani ezt a foglalást!",
        ),
        Action::DeleteReservation(reservation) => deny_unless_owner_or_admin(
            caller,
            reservation,
            "Nincs jogosultságod törölni ezt a foglalást!",
        ),
        Action::CreateResource => {
            deny_unless_admin(caller, "Nincs jogosultságod erőforrás létrehozására.")
        }
        Action::UpdateResource => {
            deny_unless_admin(caller, "Nincs jogosultságod erőforrás módosítására.")
        }
        Action::DeleteResource => {
            deny_unless_admin(caller, "Nincs jogosultságod erőforrás törlésére.")
        }
        Action::ListUsers | Action::ShowUser | Action::DeleteUser => {
            deny_unless_admin(caller, "Forbidden")
        }
    }
}

fn deny_unless_admin(caller: &User, message: &str) -> AppResult<()> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            message: message.to_string(),
        })
    }
}

fn deny_unless_owner_or_admin(
    caller: &User,
    reservation: &Reservation,
    message: &str,
) -> AppResult<()> {
    if caller.is_admin || reservation.user_id == caller.id {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    fn timestamp() -> jiff_diesel::Timestamp {
        jiff::Timestamp::UNIX_EPOCH.into()
    }

    fn user(id: i64, is_admin: bool) -> User {
        User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            password: "hash".to_string(),
            phone: None,
            is_admin,
            created_at: timestamp(),
            updated_at: timestamp(),
            deleted_at: None,
        }
    }

    fn reservation(owner_id: i64) -> Reservation {
        Reservation {
            id: 1,
            user_id: owner_id,
            resource_id: 1,
            start_time: timestamp(),
            end_time: timestamp(),
            status: ReservationStatus::Pending,
            created_at: timestamp(),
            updated_at: timestamp(),
            deleted_at: None,
        }
    }

    fn denial_message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Forbidden { message }) => message,
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_owner_may_view_update_and_delete_own_reservation() {
        let owner = user(7, false);
        let record = reservation(7);

        assert!(authorize(&owner, Action::ViewReservation(&record)).is_ok());
        assert!(authorize(&owner, Action::UpdateReservation(&record)).is_ok());
        assert!(authorize(&owner, Action::DeleteReservation(&record)).is_ok());
    }

    #[test]
    fn test_admin_may_manage_any_reservation() {
        let admin = user(1, true);
        let record = reservation(7);

        assert!(authorize(&admin, Action::ViewReservation(&record)).is_ok());
        assert!(authorize(&admin, Action::UpdateReservation(&record)).is_ok());
        assert!(authorize(&admin, Action::DeleteReservation(&record)).is_ok());
    }

    #[test]
    fn test_stranger_is_denied_each_reservation_action_with_its_own_message() {
        let stranger = user(9, false);
        let record = reservation(7);

        assert_eq!(
            denial_message(authorize(&stranger, Action::ViewReservation(&record))),
            "Nincs jogosultságod megtekinteni ezt a foglalást!"
        );
        assert_eq!(
            denial_message(authorize(&stranger, Action::UpdateReservation(&record))),
            "Nincs jogosultságod módosítani ezt a foglalást!"
        );
        assert_eq!(
            denial_message(authorize(&stranger, Action::DeleteReservation(&record))),
            "Nincs jogosultságod törölni ezt a foglalást!"
        );
    }

    #[test]
    fn test_resource_management_requires_admin() {
        let admin = user(1, true);
        let member = user(2, false);

        assert!(authorize(&admin, Action::CreateResource).is_ok());
        assert!(authorize(&admin, Action::UpdateResource).is_ok());
        assert!(authorize(&admin, Action::DeleteResource).is_ok());

        assert_eq!(
            denial_message(authorize(&member, Action::CreateResource)),
            "Nincs jogosultságod erőforrás létrehozására."
        );
        assert_eq!(
            denial_message(authorize(&member, Action::UpdateResource)),
            "Nincs jogosultságod erőforrás módosítására."
        );
        assert_eq!(
            denial_message(authorize(&member, Action::DeleteResource)),
            "Nincs jogosultságod erőforrás törlésére."
        );
    }

    #[test]
    fn test_user_directory_requires_admin() {
        let admin = user(1, true);
        let member = user(2, false);

        assert!(authorize(&admin, Action::ListUsers).is_ok());
        assert!(authorize(&admin, Action::ShowUser).is_ok());
        assert!(authorize(&admin, Action::DeleteUser).is_ok());

        for action in [Action::ListUsers, Action::ShowUser, Action::DeleteUser] {
            assert_eq!(denial_message(authorize(&member, action)), "Forbidden");
        }
    }
}
