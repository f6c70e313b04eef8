//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the keys of one
//! concern:
//! - `AuthSession` - the logged in profile id
//! - `CsrfSession` - CSRF state for the OAuth login flow
//! - `OAuthFlowSession` - admin bootstrap code carried across the provider redirect

use tower_sessions::Session;
use uuid::Uuid;

use crate::server::{error::AppError, util::parse::parse_uuid_from_string};

const SESSION_AUTH_PROFILE_ID: &str = "auth:profile";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_ADMIN_CODE: &str = "auth:admin_code";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the profile id after a successful login.
    ///
    /// The session id is cycled first so a pre-login session id cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - Profile id stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn set_profile_id(&self, profile_id: Uuid) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_PROFILE_ID, profile_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the logged in profile id.
    ///
    /// # Returns
    /// - `Ok(Some(id))` - A profile is logged in
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session
    /// - `Err(AppError::InternalErr(_))` - The stored id is not a UUID
    pub async fn get_profile_id(&self) -> Result<Option<Uuid>, AppError> {
        let Some(profile_id) = self.session.get::<String>(SESSION_AUTH_PROFILE_ID).await? else {
            return Ok(None);
        };

        Ok(Some(parse_uuid_from_string(profile_id)?))
    }

    /// Removes all session data, used on logout.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// CSRF state for the OAuth flow. Tokens are single use.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the stored token.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// State that must survive the redirect to the identity provider and back.
pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Keeps the admin code presented at login until the callback redeems it.
    pub async fn set_admin_code(&self, code: &str) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_ADMIN_CODE, code).await?;
        Ok(())
    }

    /// Drops any admin code left by an earlier, unfinished login.
    pub async fn clear_admin_code(&self) -> Result<(), AppError> {
        self.session
            .remove::<String>(SESSION_AUTH_ADMIN_CODE)
            .await?;
        Ok(())
    }

    /// Retrieves and removes the admin code, if one was presented.
    pub async fn take_admin_code(&self) -> Result<Option<String>, AppError> {
        let code = self.session.remove(SESSION_AUTH_ADMIN_CODE).await?;
        Ok(code)
    }
}
