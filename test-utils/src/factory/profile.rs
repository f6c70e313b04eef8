//! Profile factory for creating test CRM users.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test profiles with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let profile = ProfileFactory::new(&db)
///     .full_name("Jane Seller")
///     .role("sales")
///     .build()
///     .await?;
/// ```
pub struct ProfileFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    email: Option<String>,
    full_name: String,
    role: String,
    is_active: bool,
}

impl<'a> ProfileFactory<'a> {
    /// Creates a new ProfileFactory with default values.
    ///
    /// Defaults:
    /// - id: random v4 UUID
    /// - email: `"user{n}@example.com"`
    /// - full_name: `"User {n}"`
    /// - role: `"viewer"`
    /// - is_active: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let n = next_id();
        Self {
            db,
            id: Uuid::new_v4(),
            email: Some(format!("user{}@example.com", n)),
            full_name: format!("User {}", n),
            role: "viewer".to_string(),
            is_active: true,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Sets the role as stored in the database (`admin`, `sales` or `viewer`).
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Inserts the profile.
    pub async fn build(self) -> Result<entity::profile::Model, DbErr> {
        let now = Utc::now();
        entity::profile::ActiveModel {
            id: ActiveValue::Set(self.id),
            email: ActiveValue::Set(self.email),
            full_name: ActiveValue::Set(self.full_name),
            avatar_url: ActiveValue::Set(None),
            role: ActiveValue::Set(self.role),
            phone: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a viewer profile with default values.
pub async fn create_profile(db: &DatabaseConnection) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).build().await
}

/// Creates an admin profile.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).role("admin").build().await
}

/// Creates a sales profile.
pub async fn create_sales(db: &DatabaseConnection) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).role("sales").build().await
}

/// Creates a viewer profile.
pub async fn create_viewer(db: &DatabaseConnection) -> Result<entity::profile::Model, DbErr> {
    ProfileFactory::new(db).role("viewer").build().await
}
