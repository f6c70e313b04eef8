//! API data transfer objects.
//!
//! Request and response bodies exchanged over the REST API. Every type derives
//! `ToSchema` so it can be referenced from the OpenAPI document.

pub mod api;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod interaction;
pub mod lead;
pub mod profile;
