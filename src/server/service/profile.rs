use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::profile::Role,
    server::{
        data::profile::ProfileRepository,
        error::{identity::IdentityError, AppError},
        model::profile::{InviteProfileParams, Profile, UpdateProfileParams, UpsertProfileParams},
        service::identity::IdentityAdminClient,
        util::validate,
    },
};

pub struct ProfileService<'a> {
    db: &'a DatabaseConnection,
    identity: &'a IdentityAdminClient,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a DatabaseConnection, identity: &'a IdentityAdminClient) -> Self {
        Self { db, identity }
    }

    /// Applies self-service changes to the caller's profile.
    ///
    /// # Returns
    /// - `Ok(Profile)` - Updated profile
    /// - `Err(AppError::BadRequest)` - Blank or oversized field
    /// - `Err(AppError::NotFound)` - The caller's profile vanished
    pub async fn update_me(
        &self,
        caller: &Profile,
        params: UpdateProfileParams,
    ) -> Result<Profile, AppError> {
        if let Some(full_name) = params.full_name.as_deref() {
            validate::required("full_name", full_name, 255)?;
        }
        validate::max_len("phone", params.phone.as_deref(), 50)?;
        validate::max_len("avatar_url", params.avatar_url.as_deref(), 2048)?;

        ProfileRepository::new(self.db)
            .update(caller.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// All profiles, oldest first.
    pub async fn list(&self) -> Result<Vec<Profile>, AppError> {
        Ok(ProfileRepository::new(self.db).get_all().await?)
    }

    /// Changes another user's role.
    ///
    /// # Returns
    /// - `Ok(Profile)` - Updated profile
    /// - `Err(AppError::Forbidden)` - `target` is the caller
    /// - `Err(AppError::NotFound)` - No such profile
    pub async fn set_role(
        &self,
        caller: &Profile,
        target: Uuid,
        role: Role,
    ) -> Result<Profile, AppError> {
        if caller.id == target {
            return Err(AppError::Forbidden(
                "You cannot change your own role".to_string(),
            ));
        }

        let profile = ProfileRepository::new(self.db)
            .set_role(target, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            "Profile {} changed role of {} ({}) to {}",
            caller.id,
            profile.full_name,
            profile.id,
            role
        );

        Ok(profile)
    }

    /// Activates or deactivates another user.
    ///
    /// # Returns
    /// - `Ok(Profile)` - Updated profile
    /// - `Err(AppError::Forbidden)` - `target` is the caller
    /// - `Err(AppError::NotFound)` - No such profile
    pub async fn set_active(
        &self,
        caller: &Profile,
        target: Uuid,
        is_active: bool,
    ) -> Result<Profile, AppError> {
        if caller.id == target {
            return Err(AppError::Forbidden(
                "You cannot deactivate your own account".to_string(),
            ));
        }

        let profile = ProfileRepository::new(self.db)
            .set_active(target, is_active)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            "Profile {} {} {} ({})",
            caller.id,
            if is_active { "activated" } else { "deactivated" },
            profile.full_name,
            profile.id
        );

        Ok(profile)
    }

    /// Invites a new sales or viewer user through the identity provider.
    ///
    /// The local profile is created (or updated) with the invited role and name as soon
    /// as the provider accepts the invitation.
    ///
    /// # Arguments
    /// - `params` - Email, name and role of the invitee
    /// - `redirect_to` - Page the invitation link lands on to set a password
    ///
    /// # Returns
    /// - `Ok(Uuid)` - Id of the invited account
    /// - `Err(AppError::BadRequest)` - Invalid email, blank name or an admin role
    /// - `Err(AppError::Conflict)` - Already registered, or the provider refused
    pub async fn invite(
        &self,
        params: InviteProfileParams,
        redirect_to: &str,
    ) -> Result<Uuid, AppError> {
        validate::required("email", &params.email, 255)?;
        validate::email("email", Some(&params.email))?;
        validate::required("full_name", &params.full_name, 255)?;
        if params.role == Role::Admin {
            return Err(AppError::BadRequest(
                "role must be sales or viewer".to_string(),
            ));
        }

        let user_id = match self
            .identity
            .invite(&params.email, &params.full_name, redirect_to)
            .await
        {
            Ok(id) => id,
            Err(IdentityError::AlreadyRegistered) => {
                return Err(AppError::Conflict(
                    "This email is already registered".to_string(),
                ));
            }
            Err(e) => {
                tracing::error!("Invitation of {} failed: {}", params.email, e);
                return Err(AppError::Conflict(
                    "The invitation could not be sent".to_string(),
                ));
            }
        };

        ProfileRepository::new(self.db)
            .upsert(UpsertProfileParams {
                id: user_id,
                email: Some(params.email.clone()),
                full_name: params.full_name,
                avatar_url: None,
                role: Some(params.role),
            })
            .await?;

        tracing::info!("Invitation sent to {} with role {}", params.email, params.role);

        Ok(user_id)
    }

    /// Deletes another user's identity provider account and CRM profile.
    ///
    /// # Returns
    /// - `Ok(())` - Both deleted
    /// - `Err(AppError::Forbidden)` - `target` is the caller
    /// - `Err(AppError::NotFound)` - No such profile
    /// - `Err(AppError::Conflict)` - The provider refused the deletion
    pub async fn delete(&self, caller: &Profile, target: Uuid) -> Result<(), AppError> {
        if caller.id == target {
            return Err(AppError::Forbidden(
                "You cannot delete your own account".to_string(),
            ));
        }

        let profile_repo = ProfileRepository::new(self.db);

        if !profile_repo.exists(target).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        match self.identity.delete_user(target).await {
            Ok(()) => {}
            Err(IdentityError::Request(e)) => return Err(e.into()),
            Err(e) => {
                tracing::error!("Deleting identity {} failed: {}", target, e);
                return Err(AppError::Conflict(format!("Failed to delete user: {}", e)));
            }
        }

        profile_repo.delete(target).await?;

        tracing::info!("Profile {} deleted by {}", target, caller.id);

        Ok(())
    }
}
