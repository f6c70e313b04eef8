//! Interaction data repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::{
    data::{contact::ContactRepository, profile::ProfileRepository},
    model::interaction::{
        CreateInteractionParams, Interaction, InteractionWithRelations, TimelineSubject,
    },
};

/// Repository providing database operations for interactions.
pub struct InteractionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InteractionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the latest interactions recorded against one contact, lead or company.
    ///
    /// # Arguments
    /// - `subject` - Record the timeline belongs to
    /// - `limit` - Maximum number of interactions returned
    ///
    /// # Returns
    /// - `Ok(Vec<InteractionWithRelations>)` - Interactions, newest `occurred_at` first
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_timeline(
        &self,
        subject: TimelineSubject,
        limit: u64,
    ) -> Result<Vec<InteractionWithRelations>, DbErr> {
        let condition = match subject {
            TimelineSubject::Contact(id) => entity::interaction::Column::ContactId.eq(id),
            TimelineSubject::Lead(id) => entity::interaction::Column::LeadId.eq(id),
            TimelineSubject::Company(id) => entity::interaction::Column::CompanyId.eq(id),
        };

        let entities = entity::prelude::Interaction::find()
            .filter(condition)
            .order_by_desc(entity::interaction::Column::OccurredAt)
            .order_by_desc(entity::interaction::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_relations(entities).await
    }

    /// Gets the latest interactions across the CRM, optionally only one author's.
    pub async fn get_recent(
        &self,
        author_id: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<InteractionWithRelations>, DbErr> {
        let mut query = entity::prelude::Interaction::find();
        if let Some(author_id) = author_id {
            query = query.filter(entity::interaction::Column::AuthorId.eq(author_id));
        }

        let entities = query
            .order_by_desc(entity::interaction::Column::OccurredAt)
            .order_by_desc(entity::interaction::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_relations(entities).await
    }

    async fn with_relations(
        &self,
        entities: Vec<entity::interaction::Model>,
    ) -> Result<Vec<InteractionWithRelations>, DbErr> {
        let author_ids: Vec<Uuid> = entities.iter().filter_map(|i| i.author_id).collect();
        let contact_ids: Vec<Uuid> = entities.iter().filter_map(|i| i.contact_id).collect();

        let authors = ProfileRepository::new(self.db)
            .find_models_by_ids(&author_ids)
            .await?;
        let contacts = ContactRepository::new(self.db)
            .find_models_by_ids(&contact_ids)
            .await?;

        entities
            .into_iter()
            .map(|entity| {
                let author = entity.author_id.and_then(|id| authors.get(&id).cloned());
                let contact = entity.contact_id.and_then(|id| contacts.get(&id).cloned());
                Ok(InteractionWithRelations {
                    interaction: Interaction::from_entity(entity)?,
                    author,
                    contact,
                })
            })
            .collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Interaction>, DbErr> {
        entity::prelude::Interaction::find_by_id(id)
            .one(self.db)
            .await?
            .map(Interaction::from_entity)
            .transpose()
    }

    /// Counts interactions that occurred at or after `since`.
    pub async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::Interaction::find()
            .filter(entity::interaction::Column::OccurredAt.gte(since))
            .count(self.db)
            .await
    }

    /// Records an interaction, defaulting `occurred_at` to now.
    ///
    /// # Returns
    /// - `Ok(InteractionWithRelations)` - The created interaction with its author row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        params: CreateInteractionParams,
    ) -> Result<InteractionWithRelations, DbErr> {
        let now = Utc::now();
        let entity = entity::interaction::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            subject: ActiveValue::Set(params.subject),
            body: ActiveValue::Set(params.body),
            direction: ActiveValue::Set(params.direction.map(|d| d.as_str().to_string())),
            duration_min: ActiveValue::Set(params.duration_min),
            scheduled_at: ActiveValue::Set(params.scheduled_at),
            occurred_at: ActiveValue::Set(params.occurred_at.unwrap_or(now)),
            contact_id: ActiveValue::Set(params.contact_id),
            lead_id: ActiveValue::Set(params.lead_id),
            company_id: ActiveValue::Set(params.company_id),
            author_id: ActiveValue::Set(Some(params.author_id)),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        let mut created = self.with_relations(vec![entity]).await?;

        created.pop().ok_or(DbErr::RecordNotInserted)
    }

    /// Deletes an interaction.
    ///
    /// # Returns
    /// - `Ok(true)` - Interaction deleted
    /// - `Ok(false)` - No interaction with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Interaction::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
