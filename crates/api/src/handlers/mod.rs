pub mod cat;
pub mod mission;
pub mod target;

use spycat_core::types::DbId;

use crate::error::AppError;

/// Parse a path identifier, rejecting anything that is not a positive
/// integer with `"invalid <entity> id"`.
pub fn parse_id(raw: &str, entity: &str) -> Result<DbId, AppError> {
    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!("invalid {entity} id"))),
    }
}
