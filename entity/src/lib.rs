//! SeaORM entities for the CRM schema.

pub mod prelude;

pub mod company;
pub mod contact;
pub mod interaction;
pub mod lead;
pub mod profile;
