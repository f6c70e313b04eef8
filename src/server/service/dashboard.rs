//! Dashboard aggregates.
//!
//! Company, contact and interaction counts are global; lead figures follow the
//! caller's lead scope.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        company::CompanyRepository, contact::ContactRepository, interaction::InteractionRepository,
        lead::LeadRepository,
    },
    error::AppError,
    model::{
        dashboard::{Kpis, TopCommercial},
        interaction::InteractionWithRelations,
        lead::{LeadScope, StatusTotals},
        profile::Profile,
    },
    util::{time::start_of_month, validate},
};

pub const DEFAULT_ACTIVITY_LIMIT: u64 = 10;
pub const MAX_ACTIVITY_LIMIT: u64 = 50;
pub const TOP_COMMERCIALS: usize = 5;

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn kpis(&self, caller: &Profile) -> Result<Kpis, AppError> {
        let now = Utc::now();
        let scope = LeadScope::for_profile(caller);

        let companies = CompanyRepository::new(self.db).get_stats(now).await?.total;
        let contacts = ContactRepository::new(self.db).count().await?;
        let lead_stats = LeadRepository::new(self.db).get_stats(scope, now).await?;
        let interactions_this_month = InteractionRepository::new(self.db)
            .count_since(start_of_month(now))
            .await?;

        Ok(Kpis {
            companies,
            contacts,
            open_leads: lead_stats.total - lead_stats.won - lead_stats.lost,
            pipeline_value: lead_stats.pipeline_value,
            revenue_won: lead_stats.revenue_won,
            conversion_rate: lead_stats.conversion_rate,
            interactions_this_month,
        })
    }

    /// One entry per pipeline stage, zeros included.
    pub async fn leads_by_status(&self, caller: &Profile) -> Result<Vec<StatusTotals>, AppError> {
        let scope = LeadScope::for_profile(caller);

        Ok(LeadRepository::new(self.db)
            .get_status_totals(scope)
            .await?)
    }

    /// Latest interactions; non-admins only see the ones they authored.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - `limit` is outside `1..=50`
    pub async fn activity(
        &self,
        caller: &Profile,
        limit: Option<u64>,
    ) -> Result<Vec<InteractionWithRelations>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        validate::range("limit", Some(limit), 1, MAX_ACTIVITY_LIMIT)?;

        let author = (!caller.is_admin()).then_some(caller.id);

        Ok(InteractionRepository::new(self.db)
            .get_recent(author, limit)
            .await?)
    }

    pub async fn top_commercials(&self) -> Result<Vec<TopCommercial>, AppError> {
        Ok(LeadRepository::new(self.db)
            .get_top_commercials(TOP_COMMERCIALS)
            .await?)
    }
}
