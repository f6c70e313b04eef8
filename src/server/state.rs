//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client and OAuth2 client for the identity provider login flow
//! - Bearer token verifier and identity provider admin client
//! - Admin code service for bootstrapping the first admin
//! - The dashboard URL that logins redirect to

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use super::service::{
    admin_code::AdminCodeService, auth::token::JwtVerifier, identity::IdentityAdminClient,
};

/// Type alias for the OAuth2 client configured with authorize and token endpoints.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the database handle is a pool, `reqwest::Client`
/// and `AdminCodeService` share their internals through `Arc`, and the verifier
/// only holds key material.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for identity provider requests.
    ///
    /// Configured without redirect following.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the authorization-code login flow.
    pub oauth_client: OAuth2Client,

    /// Service for the one-time admin bootstrap code.
    pub admin_code_service: AdminCodeService,

    /// Verifies bearer tokens issued by the identity provider.
    pub jwt: JwtVerifier,

    /// Invites and deletes accounts at the identity provider.
    pub identity: IdentityAdminClient,

    /// OpenID userinfo endpoint queried after the code exchange.
    pub userinfo_url: String,

    /// Dashboard origin that logins and invitations redirect to.
    pub frontend_url: String,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        admin_code_service: AdminCodeService,
        jwt: JwtVerifier,
        identity: IdentityAdminClient,
        userinfo_url: String,
        frontend_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            admin_code_service,
            jwt,
            identity,
            userinfo_url,
            frontend_url,
        }
    }
}
