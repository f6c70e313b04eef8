//! Lead factory for creating test leads.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test leads with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let lead = LeadFactory::new(&db)
///     .status("won")
///     .value(5000.0)
///     .assigned_to(sales.id)
///     .build()
///     .await?;
/// ```
pub struct LeadFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    status: String,
    value: Option<f64>,
    probability: i32,
    contact_id: Option<Uuid>,
    company_id: Option<Uuid>,
    assigned_to: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> LeadFactory<'a> {
    /// Creates a new LeadFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Lead {n}"`
    /// - status: `"new"`, probability: `0`, no value
    /// - unassigned, no contact or company
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let n = next_id();
        let now = Utc::now();
        Self {
            db,
            title: format!("Lead {}", n),
            status: "new".to_string(),
            value: None,
            probability: 0,
            contact_id: None,
            company_id: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the stored pipeline stage.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn probability(mut self, probability: i32) -> Self {
        self.probability = probability;
        self
    }

    pub fn contact_id(mut self, contact_id: Uuid) -> Self {
        self.contact_id = Some(contact_id);
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

    /// Sets both `created_at` and `updated_at`.
    pub fn timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub async fn build(self) -> Result<entity::lead::Model, DbErr> {
        entity::lead::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(self.title),
            status: ActiveValue::Set(self.status),
            value: ActiveValue::Set(self.value),
            probability: ActiveValue::Set(self.probability),
            expected_close_date: ActiveValue::Set(None),
            contact_id: ActiveValue::Set(self.contact_id),
            company_id: ActiveValue::Set(self.company_id),
            assigned_to: ActiveValue::Set(self.assigned_to),
            source: ActiveValue::Set(None),
            lost_reason: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.updated_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unassigned lead in the `new` stage.
pub async fn create_lead(db: &DatabaseConnection) -> Result<entity::lead::Model, DbErr> {
    LeadFactory::new(db).build().await
}
