//! Store identifiers.

use fauna_core::error::CoreError;
use mongodb::bson::oid::ObjectId;

/// Every document is keyed by a 12-byte ObjectId (24 hex characters on the wire).
pub type DbId = ObjectId;

/// Parse a hex identifier, naming `what` in the validation message.
///
/// ```
/// use fauna_db::id::parse_id;
/// assert!(parse_id("65a1f0c2e4b0a1b2c3d4e5f6", "ID").is_ok());
/// assert!(parse_id("nope", "category ID").is_err());
/// ```
pub fn parse_id(raw: &str, what: &str) -> Result<DbId, CoreError> {
    ObjectId::parse_str(raw).map_err(|_| CoreError::Validation(format!("Invalid {what} format")))
}

/// Parse an optional reference field. Absent or empty input means "no reference".
pub fn parse_optional_ref(raw: Option<&str>, what: &str) -> Result<Option<DbId>, CoreError> {
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => parse_id(s, what).map(Some),
        None => Ok(None),
    }
}
