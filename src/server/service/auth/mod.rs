//! OAuth2 login against the identity provider and bearer token verification.

use oauth2::{CsrfToken, Scope};
use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::state::OAuth2Client;

pub mod callback;
pub mod token;

/// Drives the authorization-code login flow.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    /// OpenID userinfo endpoint queried with the exchanged access token.
    pub userinfo_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        userinfo_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            userinfo_url,
        }
    }

    /// Builds the provider's authorize URL with a fresh CSRF state.
    ///
    /// Requests the `openid`, `email` and `profile` scopes so the userinfo endpoint
    /// returns the caller's email and display name.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Where to redirect the browser, and the state to remember
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url();

        (authorize_url, csrf_state)
    }
}
