//! HTTP request handlers.
//!
//! Controllers authenticate the caller through `AuthGuard`, convert DTOs into
//! service parameters, call a service and convert its domain models back into DTOs.

pub mod auth;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod interaction;
pub mod lead;
pub mod user;
