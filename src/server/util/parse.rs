use uuid::Uuid;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a UUID value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `Uuid`
///
/// # Returns
/// - `Ok(Uuid)` - Successfully parsed String to `Uuid`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse the string as a UUID
pub fn parse_uuid_from_string(value: String) -> Result<Uuid, AppError> {
    let result = Uuid::parse_str(&value).map_err(|e| InternalError::ParseStringId {
        value,
        source: e,
    })?;

    Ok(result)
}
