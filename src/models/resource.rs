use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Bookable resource row. The `kind` field maps to the `type` column,
/// which is reserved in Rust.
#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Insert payload. `available` falls back to the column default (true)
/// when not provided.
#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::resources)]
pub struct NewResource {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Partial-update changeset. `description` is doubly optional: the
/// outer None skips the column, Some(None) writes SQL NULL.
#[derive(Clone, Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::resources)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<Option<String>>,
    pub available: Option<bool>,
}

impl UpdateResource {
    /// True when no field is set, in which case no UPDATE should be issued.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.description.is_none()
            && self.available.is_none()
    }
}
