//! Profile domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::profile::{InviteUserDto, ProfileDto, ProfileSummaryDto, Role, UpdateMeDto},
    server::model::parse_column,
};

/// CRM user linked to an identity provider account.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - The stored role is not a known role
    pub fn from_entity(entity: entity::profile::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            email: entity.email,
            full_name: entity.full_name,
            avatar_url: entity.avatar_url,
            role: parse_column("profile.role", &entity.role)?,
            phone: entity.phone,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn into_dto(self) -> ProfileDto {
        ProfileDto {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            avatar_url: self.avatar_url,
            role: self.role,
            phone: self.phone,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Builds the short assignee/author form from a profile row.
pub fn profile_summary(entity: &entity::profile::Model) -> ProfileSummaryDto {
    ProfileSummaryDto {
        id: entity.id,
        full_name: entity.full_name.clone(),
        avatar_url: entity.avatar_url.clone(),
    }
}

/// Insert-or-update of a profile keyed by identity provider subject.
#[derive(Debug, Clone)]
pub struct UpsertProfileParams {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
    /// Role to set. `None` keeps an existing role and gives new profiles `viewer`.
    pub role: Option<Role>,
}

/// Self-service profile changes; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateMeDto) -> Self {
        Self {
            full_name: dto.full_name,
            phone: dto.phone,
            avatar_url: dto.avatar_url,
        }
    }
}

/// Invitation of a new user by an admin.
#[derive(Debug, Clone)]
pub struct InviteProfileParams {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl InviteProfileParams {
    pub fn from_dto(dto: InviteUserDto) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            full_name: dto.full_name.trim().to_string(),
            role: dto.role,
        }
    }
}
