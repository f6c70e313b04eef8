//! Interaction factory for creating timeline entries.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test interactions with customizable fields.
pub struct InteractionFactory<'a> {
    db: &'a DatabaseConnection,
    kind: String,
    subject: Option<String>,
    contact_id: Option<Uuid>,
    lead_id: Option<Uuid>,
    company_id: Option<Uuid>,
    author_id: Option<Uuid>,
    occurred_at: DateTime<Utc>,
}

impl<'a> InteractionFactory<'a> {
    /// Creates a new InteractionFactory for a `note` occurring now with no subject rows.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            kind: "note".to_string(),
            subject: None,
            contact_id: None,
            lead_id: None,
            company_id: None,
            author_id: None,
            occurred_at: Utc::now(),
        }
    }

    /// Sets the stored interaction kind (`email`, `call`, `meeting`, `note`, `sms`).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn contact_id(mut self, contact_id: Uuid) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn lead_id(mut self, lead_id: Uuid) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    pub fn company_id(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn author_id(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    pub async fn build(self) -> Result<entity::interaction::Model, DbErr> {
        entity::interaction::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            kind: ActiveValue::Set(self.kind),
            subject: ActiveValue::Set(self.subject),
            body: ActiveValue::Set(None),
            direction: ActiveValue::Set(None),
            duration_min: ActiveValue::Set(None),
            scheduled_at: ActiveValue::Set(None),
            occurred_at: ActiveValue::Set(self.occurred_at),
            contact_id: ActiveValue::Set(self.contact_id),
            lead_id: ActiveValue::Set(self.lead_id),
            company_id: ActiveValue::Set(self.company_id),
            author_id: ActiveValue::Set(self.author_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a note on `contact_id` authored by `author_id`.
pub async fn create_interaction(
    db: &DatabaseConnection,
    contact_id: Uuid,
    author_id: Uuid,
) -> Result<entity::interaction::Model, DbErr> {
    InteractionFactory::new(db)
        .contact_id(contact_id)
        .author_id(author_id)
        .build()
        .await
}
