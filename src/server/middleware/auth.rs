use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;
use uuid::Uuid;

use crate::server::{
    data::profile::ProfileRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::profile::Profile,
    service::auth::token::JwtVerifier,
};

pub enum Permission {
    /// Role `admin`.
    Admin,
    /// Role `admin` or `sales`.
    Write,
}

/// Resolves the caller of a request and checks their permissions.
///
/// A bearer token in the `Authorization` header takes precedence over the session
/// cookie. When a bearer header is present but invalid the request is refused rather
/// than falling back to the session.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtVerifier,
    headers: &'a HeaderMap,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtVerifier,
        headers: &'a HeaderMap,
        session: &'a Session,
    ) -> Self {
        Self {
            db,
            jwt,
            headers,
            session,
        }
    }

    /// Loads the caller's profile and checks every permission in `permissions`.
    ///
    /// An empty list only requires an authenticated, active profile.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The caller's profile
    /// - `Err(AuthError::NotAuthenticated)` - No bearer token and no session login
    /// - `Err(AuthError::InvalidToken)` - Bearer token failed verification
    /// - `Err(AuthError::ProfileNotFound)` - The identity has no profile
    /// - `Err(AuthError::AccountDisabled)` - The profile is deactivated
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub async fn require(&self, permissions: &[Permission]) -> Result<Profile, AppError> {
        let profile_repo = ProfileRepository::new(self.db);

        let profile_id = self.caller_id().await?;

        let Some(profile) = profile_repo.find_by_id(profile_id).await? else {
            return Err(AuthError::ProfileNotFound(profile_id).into());
        };

        if !profile.is_active {
            return Err(AuthError::AccountDisabled(profile_id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !profile.is_admin() {
                        return Err(AuthError::AccessDenied(
                            profile_id,
                            format!("admin role required, profile has {}", profile.role),
                        )
                        .into());
                    }
                }
                Permission::Write => {
                    if !profile.role.can_write() {
                        return Err(AuthError::AccessDenied(
                            profile_id,
                            format!("write access required, profile has {}", profile.role),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(profile)
    }

    async fn caller_id(&self) -> Result<Uuid, AppError> {
        if let Some(token) = bearer_token(self.headers)? {
            return Ok(self.jwt.verify(token)?);
        }

        match AuthSession::new(self.session).get_profile_id().await? {
            Some(id) => Ok(id),
            None => Err(AuthError::NotAuthenticated.into()),
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// # Returns
/// - `Ok(None)` - No `Authorization` header
/// - `Ok(Some(token))` - Bearer token present
/// - `Err(AuthError::InvalidToken)` - Header present but not a bearer credential
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim()))
        }
        _ => Err(AuthError::InvalidToken(
            "authorization header is not a bearer token".to_string(),
        )),
    }
}
