pub mod animal;
pub mod category;
pub mod species;

use fauna_db::id::{parse_id, DbId};

use crate::error::AppResult;

/// Parse a path identifier; malformed input is a 400.
pub(crate) fn path_id(raw: &str) -> AppResult<DbId> {
    Ok(parse_id(raw, "ID")?)
}
