use oauth2::{AuthorizationCode, TokenResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::profile::Role,
    server::{
        data::profile::ProfileRepository,
        error::{auth::AuthError, AppError},
        error::internal::InternalError,
        model::profile::{Profile, UpsertProfileParams},
        service::{admin_code::AdminCodeService, auth::AuthService},
    },
};

/// Claims returned by the provider's userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl UserInfo {
    /// Display name, falling back to the local part of the email.
    fn full_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .unwrap_or_default()
            .to_string()
    }
}

impl<'a> AuthService<'a> {
    /// Completes a login.
    ///
    /// Exchanges the authorization code, fetches the caller's identity and upserts
    /// their profile. Identity fields are refreshed on every login and new profiles
    /// start as viewers. An admin code is redeemed only after the upsert, for an active
    /// profile, and promotes that profile to admin.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the provider's redirect
    /// - `admin_code` - Bootstrap code presented at login, if any
    /// - `admin_codes` - Holder of the pending bootstrap code
    ///
    /// # Returns
    /// - `Ok(Profile)` - The logged in profile
    /// - `Err(AuthError::TokenExchange)` - The provider refused the code
    /// - `Err(AuthError::AccountDisabled)` - The profile has been deactivated
    /// - `Err(AppError::ReqwestErr)` - Userinfo request failed
    pub async fn callback(
        &self,
        authorization_code: String,
        admin_code: Option<&str>,
        admin_codes: &AdminCodeService,
    ) -> Result<Profile, AppError> {
        let profile_repo = ProfileRepository::new(self.db);

        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let user_info = self.fetch_user_info(token.access_token().secret()).await?;

        let profile = profile_repo
            .upsert(UpsertProfileParams {
                id: user_info.sub,
                full_name: user_info.full_name(),
                email: user_info.email,
                avatar_url: user_info.picture,
                role: None,
            })
            .await?;

        if !profile.is_active {
            return Err(AuthError::AccountDisabled(profile.id).into());
        }

        let Some(code) = admin_code else {
            return Ok(profile);
        };
        if !admin_codes.redeem(code).await {
            tracing::warn!("Login of {} presented an invalid or expired admin code", profile.id);
            return Ok(profile);
        }

        let admin = profile_repo
            .set_role(profile.id, Role::Admin)
            .await?
            .ok_or(InternalError::MissingAfterWrite {
                entity: "profile",
                id: profile.id,
            })?;

        tracing::info!("Profile {} ({}) has been set as admin", admin.full_name, admin.id);

        Ok(admin)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, AppError> {
        let user_info = self
            .http_client
            .get(self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<UserInfo>()
            .await?;

        Ok(user_info)
    }
}
