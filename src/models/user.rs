use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Account row. `password` holds the argon2 PHC hash; a set
/// `deleted_at` marks an account that no longer authenticates.
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Insert payload for registration. `password` carries the hash, never
/// the plaintext.
#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Self-service profile changeset; absent fields keep their stored
/// value.
#[derive(Clone, Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUser {
    /// True when no field is set, in which case no UPDATE should be issued.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}
