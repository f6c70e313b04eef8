//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Field validation, lead visibility and ownership rules
//! - **Orchestration**: Coordinating repository calls with the identity provider
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//!
//! Services borrow the database connection for the duration of a request and are
//! constructed per call.

pub mod admin_code;
pub mod auth;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod identity;
pub mod interaction;
pub mod lead;
pub mod profile;

#[cfg(test)]
mod test;
