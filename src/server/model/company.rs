//! Company domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::company::{
        CompanyContactDto, CompanyDetailDto, CompanyDto, CompanyListItemDto, CompanySize,
        CompanyStatsDto, CompanySummaryDto, CreateCompanyDto, IndustryCountDto, UpdateCompanyDto,
    },
    server::model::parse_column,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub logo_url: Option<String>,
    pub annual_revenue: Option<f64>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - The stored size is not a known bracket
    pub fn from_entity(entity: entity::company::Model) -> Result<Self, DbErr> {
        let size = entity
            .size
            .as_deref()
            .map(|s| parse_column("company.size", s))
            .transpose()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            domain: entity.domain,
            industry: entity.industry,
            size,
            website: entity.website,
            phone: entity.phone,
            address: entity.address,
            city: entity.city,
            country: entity.country,
            logo_url: entity.logo_url,
            annual_revenue: entity.annual_revenue,
            notes: entity.notes,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> CompanyDto {
        CompanyDto {
            id: self.id,
            name: self.name,
            domain: self.domain,
            industry: self.industry,
            size: self.size,
            website: self.website,
            phone: self.phone,
            address: self.address,
            city: self.city,
            country: self.country,
            logo_url: self.logo_url,
            annual_revenue: self.annual_revenue,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Builds the `{id, name, logo_url}` summary from a company row.
pub fn company_summary(entity: &entity::company::Model) -> CompanySummaryDto {
    CompanySummaryDto {
        id: entity.id,
        name: entity.name.clone(),
        logo_url: entity.logo_url.clone(),
    }
}

/// Company list row with the number of linked contacts.
#[derive(Debug, Clone)]
pub struct CompanyWithCount {
    pub company: Company,
    pub contacts_count: u64,
}

impl CompanyWithCount {
    pub fn into_dto(self) -> CompanyListItemDto {
        CompanyListItemDto {
            company: self.company.into_dto(),
            contacts_count: self.contacts_count,
        }
    }
}

/// Company with its first contacts.
#[derive(Debug, Clone)]
pub struct CompanyDetail {
    pub company: Company,
    pub contacts: Vec<entity::contact::Model>,
}

impl CompanyDetail {
    pub fn into_dto(self) -> CompanyDetailDto {
        CompanyDetailDto {
            company: self.company.into_dto(),
            contacts: self
                .contacts
                .into_iter()
                .map(|c| CompanyContactDto {
                    id: c.id,
                    first_name: c.first_name,
                    last_name: c.last_name,
                    email: c.email,
                    phone: c.phone,
                    job_title: c.job_title,
                })
                .collect(),
        }
    }
}

/// List filters; every text filter is a case-insensitive substring match.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    /// Matches name or domain.
    pub search: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompanyStats {
    pub total: u64,
    pub new_this_month: u64,
    pub by_industry: Vec<(String, u64)>,
}

impl CompanyStats {
    pub fn into_dto(self) -> CompanyStatsDto {
        CompanyStatsDto {
            total: self.total,
            new_this_month: self.new_this_month,
            by_industry: self
                .by_industry
                .into_iter()
                .map(|(industry, count)| IndustryCountDto { industry, count })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCompanyParams {
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub logo_url: Option<String>,
    pub annual_revenue: Option<f64>,
    pub notes: Option<String>,
    pub created_by: Uuid,
}

impl CreateCompanyParams {
    pub fn from_dto(dto: CreateCompanyDto, created_by: Uuid) -> Self {
        Self {
            name: dto.name,
            domain: dto.domain,
            industry: dto.industry,
            size: dto.size,
            website: dto.website,
            phone: dto.phone,
            address: dto.address,
            city: dto.city,
            country: dto.country,
            logo_url: dto.logo_url,
            annual_revenue: dto.annual_revenue,
            notes: dto.notes,
            created_by,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyParams {
    pub name: Option<String>,
    pub domain: Option<Option<String>>,
    pub industry: Option<Option<String>>,
    pub size: Option<Option<CompanySize>>,
    pub website: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub annual_revenue: Option<Option<f64>>,
    pub notes: Option<Option<String>>,
}

impl UpdateCompanyParams {
    pub fn from_dto(dto: UpdateCompanyDto) -> Self {
        Self {
            name: dto.name,
            domain: dto.domain,
            industry: dto.industry,
            size: dto.size,
            website: dto.website,
            phone: dto.phone,
            address: dto.address,
            city: dto.city,
            country: dto.country,
            logo_url: dto.logo_url,
            annual_revenue: dto.annual_revenue,
            notes: dto.notes,
        }
    }
}
