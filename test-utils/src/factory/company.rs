//! Company factory for creating test companies.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test companies with customizable fields.
pub struct CompanyFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    domain: Option<String>,
    industry: Option<String>,
    city: Option<String>,
    annual_revenue: Option<f64>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> CompanyFactory<'a> {
    /// Creates a new CompanyFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Company {n}"`
    /// - domain: `"company{n}.example.com"`
    /// - industry, city, annual_revenue, created_by: `None`
    /// - created_at/updated_at: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let n = next_id();
        let now = Utc::now();
        Self {
            db,
            name: format!("Company {}", n),
            domain: Some(format!("company{}.example.com", n)),
            industry: None,
            city: None,
            annual_revenue: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn annual_revenue(mut self, annual_revenue: f64) -> Self {
        self.annual_revenue = Some(annual_revenue);
        self
    }

    pub fn created_by(mut self, created_by: Uuid) -> Self {
        self.created_by = Some(created_by);
        self
    }

    /// Sets both `created_at` and `updated_at`.
    pub fn timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub async fn build(self) -> Result<entity::company::Model, DbErr> {
        entity::company::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(self.name),
            domain: ActiveValue::Set(self.domain),
            industry: ActiveValue::Set(self.industry),
            size: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            city: ActiveValue::Set(self.city),
            country: ActiveValue::Set(None),
            logo_url: ActiveValue::Set(None),
            annual_revenue: ActiveValue::Set(self.annual_revenue),
            notes: ActiveValue::Set(None),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.updated_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a company with default values.
pub async fn create_company(db: &DatabaseConnection) -> Result<entity::company::Model, DbErr> {
    CompanyFactory::new(db).build().await
}
