use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::lead::LeadStatus;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct KpisDto {
    pub companies: u64,
    pub contacts: u64,
    pub open_leads: u64,
    pub pipeline_value: f64,
    pub revenue_won: f64,
    pub conversion_rate: u32,
    pub interactions_this_month: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LeadsByStatusDto {
    pub status: LeadStatus,
    pub count: u64,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TopCommercialDto {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub won_count: u64,
    pub revenue: f64,
}
