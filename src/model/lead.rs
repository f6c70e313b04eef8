use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    api::deserialize_nullable, company::CompanySummaryDto, contact::ContactSummaryDto,
    profile::ProfileSummaryDto,
};

/// Pipeline stage of a lead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    /// Every stage in pipeline order.
    pub const PIPELINE: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Negotiation,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::PIPELINE
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown lead status '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LeadDto {
    pub id: Uuid,
    pub title: String,
    pub status: LeadStatus,
    pub value: Option<f64>,
    pub probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub source: Option<String>,
    pub lost_reason: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lead with the related contact, company and assignee.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LeadWithRelationsDto {
    #[serde(flatten)]
    pub lead: LeadDto,
    pub contact: Option<ContactSummaryDto>,
    pub company: Option<CompanySummaryDto>,
    pub assignee: Option<ProfileSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct CreateLeadDto {
    pub title: String,
    pub status: Option<LeadStatus>,
    pub value: Option<f64>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// Defaults to the caller.
    pub assigned_to: Option<Uuid>,
    pub source: Option<String>,
    pub lost_reason: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged and `null` clears a nullable field.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UpdateLeadDto {
    pub title: Option<String>,
    pub status: Option<LeadStatus>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub value: Option<Option<f64>>,
    pub probability: Option<i32>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<NaiveDate>)]
    pub expected_close_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub contact_id: Option<Option<Uuid>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub company_id: Option<Option<Uuid>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Uuid>)]
    pub assigned_to: Option<Option<Uuid>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub source: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub lost_reason: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateLeadStatusDto {
    pub status: LeadStatus,
    pub lost_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LeadStatsDto {
    pub total: u64,
    pub won: u64,
    pub lost: u64,
    pub revenue_won: f64,
    pub pipeline_value: f64,
    pub new_this_month: u64,
    /// Percentage of leads won, rounded.
    pub conversion_rate: u32,
}

/// One column of the pipeline board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PipelineColumnDto {
    pub status: LeadStatus,
    pub count: u64,
    pub total_value: f64,
    pub leads: Vec<LeadWithRelationsDto>,
}
