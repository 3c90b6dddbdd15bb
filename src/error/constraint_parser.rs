//! Extracts structured information from PostgreSQL constraint messages.
//!
//! Constraint names are the primary source because they follow the
//! migration naming scheme (`users_email_unique`,
//! `reservations_resource_id_fkey`). The message text serves as
//! fallback and supplies the offending value.

use regex::Regex;
use std::sync::OnceLock;

/// Entity name used when neither message nor constraint name reveals one.
const DEFAULT_ENTITY: &str = "record";

/// Returns `(entity, field, value)` for a unique violation.
///
/// ```
/// use reservo::error::constraint_parser::parse_unique_violation;
///
/// let message = "duplicate key value violates unique constraint \"users_email_unique\"\nDETAIL: Key (email)=(anna@example.com) already exists.";
/// let parsed = parse_unique_violation(message, Some("users_email_unique"));
/// assert_eq!(parsed, Some(("users".into(), "email".into(), "anna@example.com".into())));
/// ```
pub fn parse_unique_violation(
    message: &str,
    constraint_name: Option<&str>,
) -> Option<(String, String, String)> {
    if let Some((entity, field)) = constraint_name.and_then(split_constraint_name) {
        let value = value_in(message).unwrap_or_else(|| "duplicate_value".to_string());
        return Some((entity, field, value));
    }

    let (field, value) = key_value_in(message)?;
    let entity = table_in(message).unwrap_or_else(|| DEFAULT_ENTITY.to_string());
    Some((entity, field, value))
}

/// Returns `(entity, field)` for a not-null violation. The column must
/// be present in the message text.
pub fn parse_not_null_violation(
    message: &str,
    constraint_name: Option<&str>,
) -> Option<(String, String)> {
    let field = column_in(message)?;
    let entity = table_in(message)
        .or_else(|| {
            constraint_name
                .and_then(split_constraint_name)
                .map(|(entity, _)| entity)
        })
        .unwrap_or_else(|| DEFAULT_ENTITY.to_string());
    Some((entity, field))
}

/// Returns `(entity, field, value)` for a foreign key violation.
pub fn parse_foreign_key_violation(
    message: &str,
    constraint_name: Option<&str>,
) -> Option<(String, String, String)> {
    if let Some((entity, field)) = constraint_name.and_then(split_fkey_name) {
        let value = value_in(message).unwrap_or_else(|| "invalid_reference".to_string());
        return Some((entity, field, value));
    }

    let (field, value) = key_value_in(message)?;
    let entity = table_in(message).unwrap_or_else(|| DEFAULT_ENTITY.to_string());
    Some((entity, field, value))
}

/// Returns `(entity, field)` for a check violation.
pub fn parse_check_violation(
    message: &str,
    constraint_name: Option<&str>,
) -> Option<(String, String)> {
    if let Some(pair) = constraint_name.and_then(split_constraint_name) {
        return Some(pair);
    }

    let field = column_in(message)?;
    let entity = table_in(message).unwrap_or_else(|| DEFAULT_ENTITY.to_string());
    Some((entity, field))
}

/// Splits names like `users_email_unique` into `(users, email)`. A
/// trailing kind marker (`_unique`, `_key`, `_check`) must exist.
fn split_constraint_name(name: &str) -> Option<(String, String)> {
    let mut parts = name.split('_');
    let entity = parts.next()?;
    let field = parts.next()?;
    parts.next()?;
    Some((entity.to_string(), field.to_string()))
}

/// Splits names like `reservations_resource_id_fkey` into
/// `(reservations, resource_id)`, keeping multi-part field names intact.
fn split_fkey_name(name: &str) -> Option<(String, String)> {
    let stem = name.strip_suffix("_fkey")?;
    let (entity, field) = stem.split_once('_')?;
    Some((entity.to_string(), field.to_string()))
}

/// Matches `column "name"`.
fn column_in(message: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"column "([^"]+)""#).unwrap());
    re.captures(message).map(|caps| caps[1].to_string())
}

/// Matches `table "name"`.
fn table_in(message: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"table "([^"]+)""#).unwrap());
    re.captures(message).map(|caps| caps[1].to_string())
}

/// Matches the `Key (field)=(value)` detail line.
fn key_value_in(message: &str) -> Option<(String, String)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap());
    let caps = re.captures(message)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Value from the detail line, falling back to the first double-quoted
/// token. The fallback requires a closing quote.
fn value_in(message: &str) -> Option<String> {
    if let Some((_, value)) = key_value_in(message) {
        return Some(value);
    }

    let mut segments = message.split('"');
    segments.next()?;
    let quoted = segments.next()?;
    segments.next()?;
    Some(quoted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair(a: &str, b: &str) -> Option<(String, String)> {
        Some((a.to_string(), b.to_string()))
    }

    fn triple(a: &str, b: &str, c: &str) -> Option<(String, String, String)> {
        Some((a.to_string(), b.to_string(), c.to_string()))
    }

    #[test]
    fn test_unique_violation_prefers_the_constraint_name() {
        let message = "duplicate key value violates unique constraint \"users_email_unique\"\nDETAIL: Key (email)=(anna@example.com) already exists.";
        assert_eq!(
            parse_unique_violation(message, Some("users_email_unique")),
            triple("users", "email", "anna@example.com")
        );
    }

    #[test]
    fn test_unique_violation_parses_the_message_alone() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (email)=(bela@example.com) already exists.";
        assert_eq!(
            parse_unique_violation(message, None),
            triple("record", "email", "bela@example.com")
        );
    }

    #[test]
    fn test_unique_violation_without_detail_marks_the_value() {
        let message = "duplicate key value violates unique constraint";
        assert_eq!(
            parse_unique_violation(message, Some("users_email_unique")),
            triple("users", "email", "duplicate_value")
        );
    }

    #[test]
    fn test_not_null_violation_reads_the_column() {
        let message = "null value in column \"password\" violates not-null constraint";
        assert_eq!(
            parse_not_null_violation(message, None),
            pair("record", "password")
        );
    }

    #[test]
    fn test_foreign_key_violation_keeps_multi_part_fields() {
        let message = "insert or update on table \"reservations\" violates foreign key constraint \"reservations_resource_id_fkey\"\nDETAIL: Key (resource_id)=(999) is not present in table \"resources\".";
        assert_eq!(
            parse_foreign_key_violation(message, Some("reservations_resource_id_fkey")),
            triple("reservations", "resource_id", "999")
        );
    }

    #[test]
    fn test_foreign_key_violation_without_detail_marks_the_value() {
        let message = "insert or update violates foreign key constraint";
        assert_eq!(
            parse_foreign_key_violation(message, Some("reservations_user_id_fkey")),
            triple("reservations", "user_id", "invalid_reference")
        );
    }

    #[test]
    fn test_check_violation_uses_the_constraint_name() {
        let message = "new row for relation \"reservations\" violates check constraint \"reservations_status_check\"";
        assert_eq!(
            parse_check_violation(message, Some("reservations_status_check")),
            pair("reservations", "status")
        );
    }

    #[test]
    fn test_constraint_name_splitting() {
        assert_eq!(
            split_constraint_name("users_email_unique"),
            pair("users", "email")
        );
        assert_eq!(
            split_constraint_name("users_email_key"),
            pair("users", "email")
        );
        assert_eq!(split_constraint_name("invalid"), None);
        assert_eq!(split_constraint_name("two_parts"), None);
    }

    #[test]
    fn test_fkey_name_splitting() {
        assert_eq!(
            split_fkey_name("reservations_user_id_fkey"),
            pair("reservations", "user_id")
        );
        assert_eq!(
            split_fkey_name("reservations_resource_id_fkey"),
            pair("reservations", "resource_id")
        );
        assert_eq!(split_fkey_name("not_a_foreign_key"), None);
    }

    #[test]
    fn test_quoted_fallback_needs_a_closing_quote() {
        assert_eq!(
            value_in("some error with \"quoted_value\" in it"),
            Some("quoted_value".to_string())
        );
        assert_eq!(value_in("an unbalanced \" quote"), None);
        assert_eq!(value_in("no quotes at all"), None);
    }

    #[test]
    fn test_unrecognized_messages_parse_to_none() {
        let message = "completely unrelated error message";
        assert_eq!(parse_unique_violation(message, None), None);
        assert_eq!(parse_not_null_violation(message, None), None);
        assert_eq!(parse_foreign_key_violation(message, None), None);
        assert_eq!(parse_check_violation(message, None), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Fields and values drawn from the character sets PostgreSQL
        /// emits survive the Key (field)=(value) round trip unchanged.
        #[test]
        fn prop_key_value_extraction(
            field in "[a-z][a-z0-9_]{0,20}",
            value in "[a-zA-Z0-9@._-]{0,30}",
        ) {
            let message = format!("DETAIL: Key ({})=({}) already exists.", field, value);
            prop_assert_eq!(
                key_value_in(&message),
                Some((field, value))
            );
        }
    }
}
