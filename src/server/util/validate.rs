//! Request field validation producing 400 responses.

use crate::server::error::AppError;

/// Requires a non-blank value of at most `max` characters.
pub fn required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    max_len(field, Some(value), max)
}

/// Rejects values longer than `max` characters; `None` always passes.
pub fn max_len(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Accepts `local@domain.tld` shaped addresses without whitespace.
pub fn email(field: &str, value: Option<&str>) -> Result<(), AppError> {
    let Some(value) = value else {
        return Ok(());
    };

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{} must be a valid email address",
            field
        )))
    }
}

/// Requires `min <= value <= max` when a value is present.
pub fn range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<(), AppError> {
    match value {
        Some(v) if v < min || v > max => Err(AppError::BadRequest(format!(
            "{} must be between {} and {}",
            field, min, max
        ))),
        _ => Ok(()),
    }
}

/// Requires a present value to be zero or greater.
pub fn non_negative<T: PartialOrd + Default>(field: &str, value: Option<T>) -> Result<(), AppError> {
    match value {
        Some(v) if v < T::default() => Err(AppError::BadRequest(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}
