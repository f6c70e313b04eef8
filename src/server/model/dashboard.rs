//! Dashboard aggregates.

use uuid::Uuid;

use crate::model::dashboard::{KpisDto, TopCommercialDto};

#[derive(Debug, Clone)]
pub struct Kpis {
    pub companies: u64,
    pub contacts: u64,
    pub open_leads: u64,
    pub pipeline_value: f64,
    pub revenue_won: f64,
    pub conversion_rate: u32,
    pub interactions_this_month: u64,
}

impl Kpis {
    pub fn into_dto(self) -> KpisDto {
        KpisDto {
            companies: self.companies,
            contacts: self.contacts,
            open_leads: self.open_leads,
            pipeline_value: self.pipeline_value,
            revenue_won: self.revenue_won,
            conversion_rate: self.conversion_rate,
            interactions_this_month: self.interactions_this_month,
        }
    }
}

/// Assignee ranked by revenue from won leads.
#[derive(Debug, Clone)]
pub struct TopCommercial {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub won_count: u64,
    pub revenue: f64,
}

impl TopCommercial {
    pub fn into_dto(self) -> TopCommercialDto {
        TopCommercialDto {
            id: self.id,
            full_name: self.full_name,
            avatar_url: self.avatar_url,
            won_count: self.won_count,
            revenue: self.revenue,
        }
    }
}
