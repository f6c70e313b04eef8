//! Lead domain models, visibility rules and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ColumnTrait, Condition, DbErr};
use uuid::Uuid;

use crate::{
    model::dashboard::LeadsByStatusDto,
    model::lead::{
        CreateLeadDto, LeadDto, LeadStatsDto, LeadStatus, LeadWithRelationsDto,
        PipelineColumnDto, UpdateLeadDto,
    },
    server::model::{
        company::company_summary, contact::contact_summary, parse_column,
        profile::{profile_summary, Profile},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
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

impl Lead {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - The stored status is not a pipeline stage
    pub fn from_entity(entity: entity::lead::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            status: parse_column("lead.status", &entity.status)?,
            value: entity.value,
            probability: entity.probability,
            expected_close_date: entity.expected_close_date,
            contact_id: entity.contact_id,
            company_id: entity.company_id,
            assigned_to: entity.assigned_to,
            source: entity.source,
            lost_reason: entity.lost_reason,
            notes: entity.notes,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> LeadDto {
        LeadDto {
            id: self.id,
            title: self.title,
            status: self.status,
            value: self.value,
            probability: self.probability,
            expected_close_date: self.expected_close_date,
            contact_id: self.contact_id,
            company_id: self.company_id,
            assigned_to: self.assigned_to,
            source: self.source,
            lost_reason: self.lost_reason,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Lead with its contact, company and assignee rows.
#[derive(Debug, Clone)]
pub struct LeadWithRelations {
    pub lead: Lead,
    pub contact: Option<entity::contact::Model>,
    pub company: Option<entity::company::Model>,
    pub assignee: Option<entity::profile::Model>,
}

impl LeadWithRelations {
    pub fn into_dto(self) -> LeadWithRelationsDto {
        LeadWithRelationsDto {
            contact: self.contact.as_ref().map(contact_summary),
            company: self.company.as_ref().map(company_summary),
            assignee: self.assignee.as_ref().map(profile_summary),
            lead: self.lead.into_dto(),
        }
    }
}

/// Leads of one pipeline stage.
#[derive(Debug, Clone)]
pub struct PipelineColumn {
    pub status: LeadStatus,
    pub leads: Vec<LeadWithRelations>,
}

impl PipelineColumn {
    /// Groups leads into one column per stage, in pipeline order.
    pub fn group(leads: Vec<LeadWithRelations>) -> Vec<Self> {
        let mut columns: Vec<Self> = LeadStatus::PIPELINE
            .into_iter()
            .map(|status| Self {
                status,
                leads: Vec::new(),
            })
            .collect();

        for lead in leads {
            if let Some(column) = columns.iter_mut().find(|c| c.status == lead.lead.status) {
                column.leads.push(lead);
            }
        }

        columns
    }

    pub fn into_dto(self) -> PipelineColumnDto {
        let total_value = self.leads.iter().filter_map(|l| l.lead.value).sum();

        PipelineColumnDto {
            status: self.status,
            count: self.leads.len() as u64,
            total_value,
            leads: self.leads.into_iter().map(LeadWithRelations::into_dto).collect(),
        }
    }
}

/// Row-level access to leads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeadVisibility {
    /// Admins see every lead.
    All,
    /// Other roles see leads assigned to them or to nobody.
    AssignedOrUnassigned(Uuid),
}

impl LeadVisibility {
    pub fn for_profile(profile: &Profile) -> Self {
        if profile.is_admin() {
            Self::All
        } else {
            Self::AssignedOrUnassigned(profile.id)
        }
    }

    pub fn can_see(&self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::AssignedOrUnassigned(id) => {
                lead.assigned_to.is_none() || lead.assigned_to == Some(*id)
            }
        }
    }

    /// Query condition equivalent to `can_see`.
    pub fn condition(&self) -> Condition {
        match self {
            Self::All => Condition::all(),
            Self::AssignedOrUnassigned(id) => Condition::any()
                .add(entity::lead::Column::AssignedTo.eq(*id))
                .add(entity::lead::Column::AssignedTo.is_null()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Scope of aggregate lead figures.
///
/// Unlike list visibility, non-admin figures cover only their own leads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeadScope {
    All,
    AssignedTo(Uuid),
}

impl LeadScope {
    pub fn for_profile(profile: &Profile) -> Self {
        if profile.is_admin() {
            Self::All
        } else {
            Self::AssignedTo(profile.id)
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            Self::All => Condition::all(),
            Self::AssignedTo(id) => {
                Condition::all().add(entity::lead::Column::AssignedTo.eq(*id))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// Only honored for admins.
    pub assigned_to: Option<Uuid>,
}

/// Count and summed value of the leads in one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusTotals {
    pub status: LeadStatus,
    pub count: u64,
    pub value: f64,
}

impl StatusTotals {
    pub fn into_dto(self) -> LeadsByStatusDto {
        LeadsByStatusDto {
            status: self.status,
            count: self.count,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeadStats {
    pub total: u64,
    pub won: u64,
    pub lost: u64,
    pub revenue_won: f64,
    pub pipeline_value: f64,
    pub new_this_month: u64,
    pub conversion_rate: u32,
}

impl LeadStats {
    pub fn into_dto(self) -> LeadStatsDto {
        LeadStatsDto {
            total: self.total,
            won: self.won,
            lost: self.lost,
            revenue_won: self.revenue_won,
            pipeline_value: self.pipeline_value,
            new_this_month: self.new_this_month,
            conversion_rate: self.conversion_rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLeadParams {
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
    pub created_by: Uuid,
}

impl CreateLeadParams {
    /// Applies creation defaults: stage `new`, probability 0, assigned to the creator.
    pub fn from_dto(dto: CreateLeadDto, created_by: Uuid) -> Self {
        Self {
            title: dto.title,
            status: dto.status.unwrap_or(LeadStatus::New),
            value: dto.value,
            probability: dto.probability.unwrap_or(0),
            expected_close_date: dto.expected_close_date,
            contact_id: dto.contact_id,
            company_id: dto.company_id,
            assigned_to: Some(dto.assigned_to.unwrap_or(created_by)),
            source: dto.source,
            lost_reason: dto.lost_reason,
            notes: dto.notes,
            created_by,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateLeadParams {
    pub title: Option<String>,
    pub status: Option<LeadStatus>,
    pub value: Option<Option<f64>>,
    pub probability: Option<i32>,
    pub expected_close_date: Option<Option<NaiveDate>>,
    pub contact_id: Option<Option<Uuid>>,
    pub company_id: Option<Option<Uuid>>,
    pub assigned_to: Option<Option<Uuid>>,
    pub source: Option<Option<String>>,
    pub lost_reason: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl UpdateLeadParams {
    pub fn from_dto(dto: UpdateLeadDto) -> Self {
        Self {
            title: dto.title,
            status: dto.status,
            value: dto.value,
            probability: dto.probability,
            expected_close_date: dto.expected_close_date,
            contact_id: dto.contact_id,
            company_id: dto.company_id,
            assigned_to: dto.assigned_to,
            source: dto.source,
            lost_reason: dto.lost_reason,
            notes: dto.notes,
        }
    }
}
