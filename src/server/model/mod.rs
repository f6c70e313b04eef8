//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary, where
//! stored enum strings are parsed into typed enums, and transformed into DTOs at the
//! controller boundary. Parameter types carry validated input from controllers to
//! services and repositories.

pub mod company;
pub mod contact;
pub mod dashboard;
pub mod interaction;
pub mod lead;
pub mod pagination;
pub mod profile;

use sea_orm::DbErr;
use std::str::FromStr;

/// Parses a stored enum column, turning unknown values into a database error.
pub(crate) fn parse_column<T: FromStr<Err = String>>(
    column: &'static str,
    value: &str,
) -> Result<T, DbErr> {
    value
        .parse()
        .map_err(|e| DbErr::Custom(format!("Invalid value in {}: {}", column, e)))
}
