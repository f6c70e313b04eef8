use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access level of a CRM user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Viewer => "viewer",
        }
    }

    /// Admins and sales users may create and edit records.
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Admin | Role::Sales)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "sales" => Ok(Role::Sales),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ProfileDto {
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

/// Short form of a profile used for assignees and authors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ProfileSummaryDto {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Fields a user may change on their own profile.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateMeDto {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateRoleDto {
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateActiveDto {
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SetActiveResponseDto {
    pub message: String,
    pub user: ProfileDto,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InviteUserDto {
    pub email: String,
    pub full_name: String,
    /// Either `sales` or `viewer`.
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct InviteResponseDto {
    pub message: String,
    pub user_id: Uuid,
}
