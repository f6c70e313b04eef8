//! CRM Test Utils
//!
//! Shared testing utilities for the CRM backend. The crate offers a builder for test
//! contexts backed by in-memory SQLite databases, entity factories with sensible
//! defaults, and helpers for minting identity provider bearer tokens.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Entity factories for profiles, companies, contacts, leads and interactions
//! - **token**: Bearer token minting matching the server's HS256 verification
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_companies() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_crm_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let company = factory::create_company(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod token;
