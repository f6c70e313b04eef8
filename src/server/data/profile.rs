//! Profile data repository for database operations.
//!
//! Profiles are keyed by the identity provider subject, so inserts always carry an
//! explicit id. Role and activation changes are single-column updates that bump
//! `updated_at`.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    model::profile::Role,
    server::model::profile::{Profile, UpdateProfileParams, UpsertProfileParams},
};

/// Repository providing database operations for CRM user profiles.
pub struct ProfileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileRepository<'a> {
    /// Creates a new ProfileRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ProfileRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a profile or refreshes an existing one from identity provider data.
    ///
    /// Email, name and avatar are always overwritten. The role is only written when
    /// `param.role` is `Some`, so a regular login never demotes or promotes anyone;
    /// new profiles without a role become viewers.
    ///
    /// # Arguments
    /// - `param` - Profile id (IdP subject), identity fields and optional role
    ///
    /// # Returns
    /// - `Ok(Profile)` - The created or updated profile
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertProfileParams) -> Result<Profile, DbErr> {
        let mut update_columns = vec![
            entity::profile::Column::Email,
            entity::profile::Column::FullName,
            entity::profile::Column::AvatarUrl,
            entity::profile::Column::UpdatedAt,
        ];

        if param.role.is_some() {
            update_columns.push(entity::profile::Column::Role);
        }

        let now = Utc::now();
        let entity = entity::prelude::Profile::insert(entity::profile::ActiveModel {
            id: ActiveValue::Set(param.id),
            email: ActiveValue::Set(param.email),
            full_name: ActiveValue::Set(param.full_name),
            avatar_url: ActiveValue::Set(param.avatar_url),
            role: ActiveValue::Set(param.role.unwrap_or(Role::Viewer).as_str().to_string()),
            phone: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::profile::Column::Id)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Profile::from_entity(entity)
    }

    /// Finds a profile by id.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - Profile found
    /// - `Ok(None)` - No profile with that id
    /// - `Err(DbErr)` - Database error or unknown stored role
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DbErr> {
        entity::prelude::Profile::find_by_id(id)
            .one(self.db)
            .await?
            .map(Profile::from_entity)
            .transpose()
    }

    /// Loads profile rows for a set of ids, keyed by id.
    ///
    /// Used to attach assignee and author summaries without a query per row.
    pub async fn find_models_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, entity::profile::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = entity::prelude::Profile::find()
            .filter(entity::profile::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    /// Checks whether a profile row exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Profile::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets every profile, oldest first.
    pub async fn get_all(&self) -> Result<Vec<Profile>, DbErr> {
        entity::prelude::Profile::find()
            .order_by_asc(entity::profile::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Profile::from_entity)
            .collect()
    }

    /// Checks if any admin profile exists.
    ///
    /// Used at startup to decide whether an admin bootstrap code is needed.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin exists
    /// - `Ok(false)` - No admin exists yet
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::Profile::find()
            .filter(entity::profile::Column::Role.eq(Role::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Applies self-service changes; absent fields are left untouched.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - Updated profile
    /// - `Ok(None)` - No profile with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateProfileParams,
    ) -> Result<Option<Profile>, DbErr> {
        let Some(profile) = entity::prelude::Profile::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::profile::ActiveModel = profile.into();
        if let Some(full_name) = params.full_name {
            active_model.full_name = ActiveValue::Set(full_name);
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(avatar_url) = params.avatar_url {
            active_model.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Profile::from_entity(entity).map(Some)
    }

    /// Sets a profile's role.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - Updated profile
    /// - `Ok(None)` - No profile with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<Profile>, DbErr> {
        let Some(profile) = entity::prelude::Profile::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::profile::ActiveModel = profile.into();
        active_model.role = ActiveValue::Set(role.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Profile::from_entity(entity).map(Some)
    }

    /// Activates or deactivates a profile.
    ///
    /// # Returns
    /// - `Ok(Some(Profile))` - Updated profile
    /// - `Ok(None)` - No profile with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Profile>, DbErr> {
        let Some(profile) = entity::prelude::Profile::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::profile::ActiveModel = profile.into();
        active_model.is_active = ActiveValue::Set(is_active);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Profile::from_entity(entity).map(Some)
    }

    /// Deletes a profile.
    ///
    /// Assignments and interaction authorship referencing the profile are cleared
    /// by the foreign keys.
    ///
    /// # Returns
    /// - `Ok(true)` - Profile deleted
    /// - `Ok(false)` - No profile with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Profile::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
