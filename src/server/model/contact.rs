//! Contact domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    model::contact::{
        ContactCompanyDto, ContactDetailDto, ContactDto, ContactListItemDto, ContactStatsDto,
        ContactSummaryDto, CreateContactDto, UpdateContactDto,
    },
    server::model::{company::company_summary, profile::profile_summary},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<Uuid>,
    pub avatar_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tags: Vec<String>,
    pub is_subscribed: bool,
    pub notes: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - The stored tags are not a JSON array of strings
    pub fn from_entity(entity: entity::contact::Model) -> Result<Self, DbErr> {
        let tags: Vec<String> = serde_json::from_value(entity.tags)
            .map_err(|e| DbErr::Custom(format!("Invalid value in contact.tags: {}", e)))?;

        Ok(Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            mobile: entity.mobile,
            job_title: entity.job_title,
            department: entity.department,
            company_id: entity.company_id,
            avatar_url: entity.avatar_url,
            linkedin_url: entity.linkedin_url,
            address: entity.address,
            city: entity.city,
            country: entity.country,
            tags,
            is_subscribed: entity.is_subscribed,
            notes: entity.notes,
            assigned_to: entity.assigned_to,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> ContactDto {
        ContactDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            mobile: self.mobile,
            job_title: self.job_title,
            department: self.department,
            company_id: self.company_id,
            avatar_url: self.avatar_url,
            linkedin_url: self.linkedin_url,
            address: self.address,
            city: self.city,
            country: self.country,
            tags: self.tags,
            is_subscribed: self.is_subscribed,
            notes: self.notes,
            assigned_to: self.assigned_to,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Builds the `{id, first_name, last_name, email}` summary from a contact row.
pub fn contact_summary(entity: &entity::contact::Model) -> ContactSummaryDto {
    ContactSummaryDto {
        id: entity.id,
        first_name: entity.first_name.clone(),
        last_name: entity.last_name.clone(),
        email: entity.email.clone(),
    }
}

/// Contact with its company and assignee rows.
#[derive(Debug, Clone)]
pub struct ContactWithRelations {
    pub contact: Contact,
    pub company: Option<entity::company::Model>,
    pub assignee: Option<entity::profile::Model>,
}

impl ContactWithRelations {
    pub fn into_list_dto(self) -> ContactListItemDto {
        ContactListItemDto {
            company: self.company.as_ref().map(company_summary),
            contact: self.contact.into_dto(),
        }
    }

    pub fn into_detail_dto(self) -> ContactDetailDto {
        ContactDetailDto {
            company: self.company.map(|c| ContactCompanyDto {
                id: c.id,
                name: c.name,
                logo_url: c.logo_url,
                industry: c.industry,
                website: c.website,
            }),
            assignee: self.assignee.as_ref().map(profile_summary),
            contact: self.contact.into_dto(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContactSortField {
    FirstName,
    LastName,
    Email,
    City,
    CreatedAt,
    #[default]
    UpdatedAt,
}

impl FromStr for ContactSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "city" => Ok(Self::City),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(format!("cannot sort contacts by '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("sort_dir must be asc or desc, got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Matches first name, last name, email or job title.
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub is_subscribed: Option<bool>,
    pub city: Option<String>,
    pub sort_by: ContactSortField,
    pub sort_dir: SortDir,
}

#[derive(Debug, Clone)]
pub struct ContactStats {
    pub total: u64,
    pub subscribed: u64,
    pub new_this_month: u64,
}

impl ContactStats {
    pub fn into_dto(self) -> ContactStatsDto {
        ContactStatsDto {
            total: self.total,
            subscribed: self.subscribed,
            new_this_month: self.new_this_month,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateContactParams {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub company_id: Option<Uuid>,
    pub avatar_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tags: Vec<String>,
    pub is_subscribed: bool,
    pub notes: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub created_by: Uuid,
}

impl CreateContactParams {
    pub fn from_dto(dto: CreateContactDto, created_by: Uuid) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            mobile: dto.mobile,
            job_title: dto.job_title,
            department: dto.department,
            company_id: dto.company_id,
            avatar_url: dto.avatar_url,
            linkedin_url: dto.linkedin_url,
            address: dto.address,
            city: dto.city,
            country: dto.country,
            tags: dto.tags,
            is_subscribed: dto.is_subscribed,
            notes: dto.notes,
            assigned_to: dto.assigned_to,
            created_by,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub mobile: Option<Option<String>>,
    pub job_title: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub company_id: Option<Option<Uuid>>,
    pub avatar_url: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub is_subscribed: Option<bool>,
    pub notes: Option<Option<String>>,
    pub assigned_to: Option<Option<Uuid>>,
}

impl UpdateContactParams {
    pub fn from_dto(dto: UpdateContactDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            mobile: dto.mobile,
            job_title: dto.job_title,
            department: dto.department,
            company_id: dto.company_id,
            avatar_url: dto.avatar_url,
            linkedin_url: dto.linkedin_url,
            address: dto.address,
            city: dto.city,
            country: dto.country,
            tags: dto.tags,
            is_subscribed: dto.is_subscribed,
            notes: dto.notes,
            assigned_to: dto.assigned_to,
        }
    }
}
