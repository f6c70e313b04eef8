//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and
//! a `create_*` convenience function for quick default creation. Factories fill every
//! required column with unique, deterministic values.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let admin = factory::create_admin(&db).await?;
//! let company = factory::create_company(&db).await?;
//! let contact = factory::contact::ContactFactory::new(&db)
//!     .company_id(company.id)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `profile` - CRM user profiles with a role and activation flag
//! - `company` - Companies
//! - `contact` - Contacts, optionally linked to a company and assignee
//! - `lead` - Leads in any pipeline stage
//! - `interaction` - Timeline interactions
//! - `helpers` - Unique id generation and multi-entity helpers

pub mod company;
pub mod contact;
pub mod helpers;
pub mod interaction;
pub mod lead;
pub mod profile;

pub use company::create_company;
pub use contact::create_contact;
pub use interaction::create_interaction;
pub use lead::create_lead;
pub use profile::{create_admin, create_profile, create_sales, create_viewer};
