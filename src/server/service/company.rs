use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::company::CompanyRepository,
    error::AppError,
    model::{
        company::{
            Company, CompanyDetail, CompanyFilter, CompanyStats, CompanyWithCount,
            CreateCompanyParams, UpdateCompanyParams,
        },
        pagination::{Page, PageParams},
    },
    util::validate,
};

/// Largest page size accepted by the company list.
pub const MAX_PAGE_LIMIT: u64 = 500;

pub struct CompanyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        filter: &CompanyFilter,
        params: PageParams,
    ) -> Result<Page<CompanyWithCount>, AppError> {
        Ok(CompanyRepository::new(self.db)
            .get_paginated(filter, params)
            .await?)
    }

    pub async fn stats(&self) -> Result<CompanyStats, AppError> {
        Ok(CompanyRepository::new(self.db).get_stats(Utc::now()).await?)
    }

    /// Company with its first contacts.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such company
    pub async fn get(&self, id: Uuid) -> Result<CompanyDetail, AppError> {
        CompanyRepository::new(self.db)
            .find_detail(id)
            .await?
            .ok_or_else(not_found)
    }

    /// # Returns
    /// - `Ok(Company)` - The created company
    /// - `Err(AppError::BadRequest)` - Validation failed
    pub async fn create(&self, params: CreateCompanyParams) -> Result<Company, AppError> {
        validate::required("name", &params.name, 255)?;
        validate_fields(
            params.domain.as_deref(),
            params.industry.as_deref(),
            params.city.as_deref(),
            params.country.as_deref(),
            params.annual_revenue,
        )?;

        let company = CompanyRepository::new(self.db).create(params).await?;

        tracing::debug!("Company {} ({}) created", company.name, company.id);

        Ok(company)
    }

    /// # Returns
    /// - `Ok(Company)` - The updated company
    /// - `Err(AppError::BadRequest)` - Validation failed
    /// - `Err(AppError::NotFound)` - No such company
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateCompanyParams,
    ) -> Result<Company, AppError> {
        if let Some(name) = params.name.as_deref() {
            validate::required("name", name, 255)?;
        }
        validate_fields(
            params.domain.as_ref().and_then(Option::as_deref),
            params.industry.as_ref().and_then(Option::as_deref),
            params.city.as_ref().and_then(Option::as_deref),
            params.country.as_ref().and_then(Option::as_deref),
            params.annual_revenue.flatten(),
        )?;

        CompanyRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a company; its contacts and leads are unlinked, not removed.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such company
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !CompanyRepository::new(self.db).delete(id).await? {
            return Err(not_found());
        }

        tracing::info!("Company {} deleted", id);

        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Company not found".to_string())
}

fn validate_fields(
    domain: Option<&str>,
    industry: Option<&str>,
    city: Option<&str>,
    country: Option<&str>,
    annual_revenue: Option<f64>,
) -> Result<(), AppError> {
    validate::max_len("domain", domain, 255)?;
    validate::max_len("industry", industry, 100)?;
    validate::max_len("city", city, 100)?;
    validate::max_len("country", country, 100)?;
    validate::non_negative("annual_revenue", annual_revenue)?;
    Ok(())
}
