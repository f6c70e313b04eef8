//! Contact factory for creating test contacts.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test contacts with customizable fields.
pub struct ContactFactory<'a> {
    db: &'a DatabaseConnection,
    first_name: String,
    last_name: String,
    email: Option<String>,
    job_title: Option<String>,
    city: Option<String>,
    company_id: Option<Uuid>,
    assigned_to: Option<Uuid>,
    is_subscribed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> ContactFactory<'a> {
    /// Creates a new ContactFactory with default values.
    ///
    /// Defaults:
    /// - first_name: `"First{n}"`, last_name: `"Last{n}"`
    /// - email: `"contact{n}@example.com"`
    /// - not subscribed, no company, no assignee
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let n = next_id();
        let now = Utc::now();
        Self {
            db,
            first_name: format!("First{}", n),
            last_name: format!("Last{}", n),
            email: Some(format!("contact{}@example.com", n)),
            job_title: None,
            city: None,
            company_id: None,
            assigned_to: None,
            is_subscribed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn no_email(mut self) -> Self {
        self.email = None;
        self
    }

    pub fn job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn company_id(mut self, company_id: Uuid) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn assigned_to(mut self, assigned_to: Uuid) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    pub fn subscribed(mut self, is_subscribed: bool) -> Self {
        self.is_subscribed = is_subscribed;
        self
    }

    /// Sets both `created_at` and `updated_at`.
    pub fn timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub async fn build(self) -> Result<entity::contact::Model, DbErr> {
        entity::contact::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            email: ActiveValue::Set(self.email),
            phone: ActiveValue::Set(None),
            mobile: ActiveValue::Set(None),
            job_title: ActiveValue::Set(self.job_title),
            department: ActiveValue::Set(None),
            company_id: ActiveValue::Set(self.company_id),
            avatar_url: ActiveValue::Set(None),
            linkedin_url: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(self.city),
            country: ActiveValue::Set(None),
            tags: ActiveValue::Set(serde_json::json!([])),
            is_subscribed: ActiveValue::Set(self.is_subscribed),
            notes: ActiveValue::Set(None),
            assigned_to: ActiveValue::Set(self.assigned_to),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.updated_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a contact with default values.
pub async fn create_contact(db: &DatabaseConnection) -> Result<entity::contact::Model, DbErr> {
    ContactFactory::new(db).build().await
}
