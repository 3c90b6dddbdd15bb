//! Maps Diesel errors onto [`AppError`] variants.
//!
//! Constraint violations are parsed into field-level errors so the API
//! can answer with the same phrasing as request validation. Anything
//! unrecognized stays an internal database error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;
use crate::error::constraint_parser;

/// Converts `error` raised during `operation` into an [`AppError`].
pub fn map_diesel_error(error: DieselError, operation: &str) -> AppError {
    match error {
        DieselError::DatabaseError(kind, info) => map_constraint_error(kind, info, operation),
        DieselError::NotFound => AppError::not_found("record", "id", "unknown"),
        other => AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::from(other),
        },
    }
}

fn map_constraint_error(
    kind: DatabaseErrorKind,
    info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
    operation: &str,
) -> AppError {
    let message = info.message();
    let constraint = info.constraint_name();

    // Each kind yields a parsed variant when the constraint message is
    // recognized, plus a label for the raw fallback.
    let (parsed, label) = match kind {
        DatabaseErrorKind::UniqueViolation => (
            constraint_parser::parse_unique_violation(message, constraint).map(
                |(entity, field, value)| AppError::Duplicate {
                    entity,
                    field,
                    value,
                },
            ),
            "Unique constraint violation",
        ),
        DatabaseErrorKind::NotNullViolation => (
            constraint_parser::parse_not_null_violation(message, constraint).map(|(_, field)| {
                let reason = format!("The {} field is required.", field.replace('_', " "));
                AppError::Validation { field, reason }
            }),
            "Not null constraint violation",
        ),
        DatabaseErrorKind::ForeignKeyViolation => (
            constraint_parser::parse_foreign_key_violation(message, constraint).map(
                |(_, field, _)| {
                    let reason = format!("The selected {} is invalid.", field.replace('_', " "));
                    AppError::Validation { field, reason }
                },
            ),
            "Foreign key constraint violation",
        ),
        DatabaseErrorKind::CheckViolation => (
            constraint_parser::parse_check_violation(message, constraint).map(|(_, field)| {
                let reason = format!("The {} field is invalid.", field.replace('_', " "));
                AppError::Validation { field, reason }
            }),
            "Check constraint violation",
        ),
        _ => (None, "Database error"),
    };

    parsed.unwrap_or_else(|| AppError::Database {
        operation: operation.to_string(),
        source: anyhow::Error::msg(format!("{}: {}", label, message)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;

    struct FakePgError {
        message: String,
        constraint: Option<String>,
    }

    fn pg_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(FakePgError {
                message: message.to_string(),
                constraint: constraint.map(str::to_string),
            }),
        )
    }

    impl DatabaseErrorInformation for FakePgError {
        fn message(&self) -> &str {
            &self.message
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint.as_deref()
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_not_found_becomes_generic_record_error() {
        let AppError::NotFound {
            entity,
            field,
            value,
        } = map_diesel_error(DieselError::NotFound, "find")
        else {
            panic!("Expected NotFound")
        };

        assert_eq!((entity.as_str(), field.as_str()), ("record", "id"));
        assert_eq!(value, "unknown");
    }

    #[test]
    fn test_unique_violation_becomes_duplicate() {
        let error = pg_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_unique\"\nDETAIL: Key (email)=(anna@example.com) already exists.",
            Some("users_email_unique"),
        );

        let AppError::Duplicate {
            entity,
            field,
            value,
        } = map_diesel_error(error, "insert user")
        else {
            panic!("Expected Duplicate")
        };

        assert_eq!((entity.as_str(), field.as_str()), ("users", "email"));
        assert_eq!(value, "anna@example.com");
    }

    #[test]
    fn test_not_null_violation_becomes_required_field() {
        let error = pg_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"password\" violates not-null constraint",
            None,
        );

        let AppError::Validation { field, reason } = map_diesel_error(error, "insert user") else {
            panic!("Expected Validation")
        };

        assert_eq!(field, "password");
        assert_eq!(reason, "The password field is required.");
    }

    #[test]
    fn test_foreign_key_violation_becomes_invalid_selection() {
        let error = pg_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"reservations\" violates foreign key constraint \"reservations_resource_id_fkey\"\nDETAIL: Key (resource_id)=(999) is not present in table \"resources\".",
            Some("reservations_resource_id_fkey"),
        );

        let AppError::Validation { field, reason } = map_diesel_error(error, "insert reservation")
        else {
            panic!("Expected Validation")
        };

        assert_eq!(field, "resource_id");
        assert_eq!(reason, "The selected resource id is invalid.");
    }

    #[test]
    fn test_check_violation_becomes_invalid_field() {
        let error = pg_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"reservations\" violates check constraint \"reservations_status_check\"",
            Some("reservations_status_check"),
        );

        let AppError::Validation { field, reason } = map_diesel_error(error, "update reservation")
        else {
            panic!("Expected Validation")
        };

        assert_eq!(field, "status");
        assert_eq!(reason, "The status field is invalid.");
    }

    #[test]
    fn test_unparsable_constraint_falls_back_to_database_error() {
        let error = pg_error(
            DatabaseErrorKind::UniqueViolation,
            "something the parser does not recognize",
            None,
        );

        let AppError::Database { operation, source } = map_diesel_error(error, "insert resource")
        else {
            panic!("Expected Database")
        };

        assert_eq!(operation, "insert resource");
        assert!(source.to_string().contains("Unique constraint violation"));
    }

    #[test]
    fn test_other_diesel_errors_stay_internal() {
        let result = map_diesel_error(DieselError::RollbackTransaction, "update reservation");

        let AppError::Database { operation, .. } = result else {
            panic!("Expected Database")
        };
        assert_eq!(operation, "update reservation");
    }
}
