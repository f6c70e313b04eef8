//! Interaction domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::interaction::{
        ActivityDto, CreateInteractionDto, Direction, InteractionDto, InteractionKind,
    },
    server::model::{contact::contact_summary, parse_column, profile::profile_summary},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: Uuid,
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub direction: Option<Direction>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
    pub contact_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - The stored kind or direction is unknown
    pub fn from_entity(entity: entity::interaction::Model) -> Result<Self, DbErr> {
        let direction = entity
            .direction
            .as_deref()
            .map(|d| parse_column("interaction.direction", d))
            .transpose()?;

        Ok(Self {
            id: entity.id,
            kind: parse_column("interaction.kind", &entity.kind)?,
            subject: entity.subject,
            body: entity.body,
            direction,
            duration_min: entity.duration_min,
            scheduled_at: entity.scheduled_at,
            occurred_at: entity.occurred_at,
            contact_id: entity.contact_id,
            lead_id: entity.lead_id,
            company_id: entity.company_id,
            author_id: entity.author_id,
            created_at: entity.created_at,
        })
    }
}

/// Interaction with its author and contact rows.
#[derive(Debug, Clone)]
pub struct InteractionWithRelations {
    pub interaction: Interaction,
    pub author: Option<entity::profile::Model>,
    pub contact: Option<entity::contact::Model>,
}

impl InteractionWithRelations {
    pub fn into_dto(self) -> InteractionDto {
        let i = self.interaction;
        InteractionDto {
            id: i.id,
            kind: i.kind,
            subject: i.subject,
            body: i.body,
            direction: i.direction,
            duration_min: i.duration_min,
            scheduled_at: i.scheduled_at,
            occurred_at: i.occurred_at,
            contact_id: i.contact_id,
            lead_id: i.lead_id,
            company_id: i.company_id,
            author_id: i.author_id,
            created_at: i.created_at,
            author: self.author.as_ref().map(profile_summary),
        }
    }

    pub fn into_activity_dto(self) -> ActivityDto {
        let contact = self.contact.as_ref().map(contact_summary);
        ActivityDto {
            interaction: self.into_dto(),
            contact,
        }
    }
}

/// The record a timeline is built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineSubject {
    Contact(Uuid),
    Lead(Uuid),
    Company(Uuid),
}

impl TimelineSubject {
    /// Requires exactly one of the three ids.
    pub fn from_ids(
        contact_id: Option<Uuid>,
        lead_id: Option<Uuid>,
        company_id: Option<Uuid>,
    ) -> Option<Self> {
        match (contact_id, lead_id, company_id) {
            (Some(id), None, None) => Some(Self::Contact(id)),
            (None, Some(id), None) => Some(Self::Lead(id)),
            (None, None, Some(id)) => Some(Self::Company(id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInteractionParams {
    pub kind: InteractionKind,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub direction: Option<Direction>,
    pub duration_min: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub author_id: Uuid,
}

impl CreateInteractionParams {
    pub fn from_dto(dto: CreateInteractionDto, author_id: Uuid) -> Self {
        Self {
            kind: dto.kind,
            subject: dto.subject,
            body: dto.body,
            direction: dto.direction,
            duration_min: dto.duration_min,
            scheduled_at: dto.scheduled_at,
            occurred_at: dto.occurred_at,
            contact_id: dto.contact_id,
            lead_id: dto.lead_id,
            company_id: dto.company_id,
            author_id,
        }
    }

    pub fn has_subject(&self) -> bool {
        self.contact_id.is_some() || self.lead_id.is_some() || self.company_id.is_some()
    }
}
