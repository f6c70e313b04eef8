//! Database repository layer for all domain entities.
//!
//! Each repository borrows the database connection, uses SeaORM entity models
//! internally and returns domain models, parsing stored enum strings on the way out.
//! Related rows needed for summaries are loaded in one batched query per relation.

pub mod company;
pub mod contact;
pub mod interaction;
pub mod lead;
pub mod profile;

#[cfg(test)]
mod test;
