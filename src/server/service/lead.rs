use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::lead::LeadStatus,
    server::{
        data::{
            company::CompanyRepository, contact::ContactRepository, lead::LeadRepository,
            profile::ProfileRepository,
        },
        error::{internal::InternalError, AppError},
        model::{
            lead::{
                CreateLeadParams, Lead, LeadFilter, LeadScope, LeadStats, LeadVisibility,
                LeadWithRelations, PipelineColumn, UpdateLeadParams,
            },
            pagination::{Page, PageParams},
            profile::Profile,
        },
        util::validate,
    },
};

/// Largest page size accepted by the lead list.
pub const MAX_PAGE_LIMIT: u64 = 100;

pub struct LeadService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeadService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Leads visible to `caller`, newest activity first.
    pub async fn list(
        &self,
        caller: &Profile,
        filter: &LeadFilter,
        params: PageParams,
    ) -> Result<Page<LeadWithRelations>, AppError> {
        let visibility = LeadVisibility::for_profile(caller);

        Ok(LeadRepository::new(self.db)
            .get_paginated(visibility, filter, params)
            .await?)
    }

    /// Lead figures; non-admins only count leads assigned to them.
    pub async fn stats(&self, caller: &Profile) -> Result<LeadStats, AppError> {
        let scope = LeadScope::for_profile(caller);

        Ok(LeadRepository::new(self.db)
            .get_stats(scope, Utc::now())
            .await?)
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - No such lead
    /// - `Err(AppError::Forbidden)` - The lead is assigned to someone else
    pub async fn get(&self, caller: &Profile, id: Uuid) -> Result<LeadWithRelations, AppError> {
        let lead = LeadRepository::new(self.db)
            .find_with_relations(id)
            .await?
            .ok_or_else(not_found)?;

        ensure_visible(caller, &lead.lead)?;

        Ok(lead)
    }

    /// # Returns
    /// - `Ok(LeadWithRelations)` - The created lead
    /// - `Err(AppError::BadRequest)` - Validation failed or a referenced row is missing
    pub async fn create(&self, params: CreateLeadParams) -> Result<LeadWithRelations, AppError> {
        validate::required("title", &params.title, 255)?;
        validate_fields(
            Some(params.probability),
            params.value,
            params.source.as_deref(),
            params.lost_reason.as_deref(),
        )?;
        self.check_references(params.contact_id, params.company_id, params.assigned_to)
            .await?;

        let lead_repo = LeadRepository::new(self.db);
        let lead = lead_repo.create(params).await?;

        tracing::debug!("Lead {} created in stage {}", lead.id, lead.status);

        self.reload(lead.id).await
    }

    /// # Returns
    /// - `Ok(LeadWithRelations)` - The updated lead
    /// - `Err(AppError::NotFound)` - No such lead
    /// - `Err(AppError::Forbidden)` - The lead is assigned to someone else
    /// - `Err(AppError::BadRequest)` - Validation failed or a referenced row is missing
    pub async fn update(
        &self,
        caller: &Profile,
        id: Uuid,
        params: UpdateLeadParams,
    ) -> Result<LeadWithRelations, AppError> {
        let lead_repo = LeadRepository::new(self.db);

        let lead = lead_repo.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_visible(caller, &lead)?;

        if let Some(title) = params.title.as_deref() {
            validate::required("title", title, 255)?;
        }
        validate_fields(
            params.probability,
            params.value.flatten(),
            params.source.as_ref().and_then(Option::as_deref),
            params.lost_reason.as_ref().and_then(Option::as_deref),
        )?;
        self.check_references(
            params.contact_id.flatten(),
            params.company_id.flatten(),
            params.assigned_to.flatten(),
        )
        .await?;

        lead_repo.update(id, params).await?.ok_or_else(not_found)?;

        self.reload(id).await
    }

    /// Moves a lead to another pipeline stage.
    ///
    /// # Returns
    /// - `Ok(LeadWithRelations)` - The moved lead
    /// - `Err(AppError::NotFound)` - No such lead
    /// - `Err(AppError::Forbidden)` - The lead is assigned to someone else
    pub async fn update_status(
        &self,
        caller: &Profile,
        id: Uuid,
        status: LeadStatus,
        lost_reason: Option<String>,
    ) -> Result<LeadWithRelations, AppError> {
        let lead_repo = LeadRepository::new(self.db);

        let lead = lead_repo.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_visible(caller, &lead)?;

        validate::max_len("lost_reason", lost_reason.as_deref(), 500)?;

        lead_repo
            .update_status(id, status, lost_reason)
            .await?
            .ok_or_else(not_found)?;

        tracing::debug!("Lead {} moved from {} to {}", id, lead.status, status);

        self.reload(id).await
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - No such lead
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !LeadRepository::new(self.db).delete(id).await? {
            return Err(not_found());
        }

        tracing::info!("Lead {} deleted", id);

        Ok(())
    }

    /// Visible leads grouped into one column per pipeline stage.
    pub async fn pipeline(&self, caller: &Profile) -> Result<Vec<PipelineColumn>, AppError> {
        let visibility = LeadVisibility::for_profile(caller);

        let leads = LeadRepository::new(self.db)
            .get_all_visible(visibility)
            .await?;

        Ok(PipelineColumn::group(leads))
    }

    async fn reload(&self, id: Uuid) -> Result<LeadWithRelations, AppError> {
        LeadRepository::new(self.db)
            .find_with_relations(id)
            .await?
            .ok_or_else(|| InternalError::MissingAfterWrite { entity: "lead", id }.into())
    }

    async fn check_references(
        &self,
        contact_id: Option<Uuid>,
        company_id: Option<Uuid>,
        assigned_to: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(contact_id) = contact_id {
            if !ContactRepository::new(self.db).exists(contact_id).await? {
                return Err(AppError::BadRequest("Contact not found".to_string()));
            }
        }
        if let Some(company_id) = company_id {
            if !CompanyRepository::new(self.db).exists(company_id).await? {
                return Err(AppError::BadRequest("Company not found".to_string()));
            }
        }
        if let Some(assigned_to) = assigned_to {
            if !ProfileRepository::new(self.db).exists(assigned_to).await? {
                return Err(AppError::BadRequest("Assignee not found".to_string()));
            }
        }
        Ok(())
    }
}

fn ensure_visible(caller: &Profile, lead: &Lead) -> Result<(), AppError> {
    if LeadVisibility::for_profile(caller).can_see(lead) {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "You do not have access to this lead".to_string(),
    ))
}

fn validate_fields(
    probability: Option<i32>,
    value: Option<f64>,
    source: Option<&str>,
    lost_reason: Option<&str>,
) -> Result<(), AppError> {
    validate::range("probability", probability, 0, 100)?;
    validate::non_negative("value", value)?;
    validate::max_len("source", source, 100)?;
    validate::max_len("lost_reason", lost_reason, 500)?;
    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("Lead not found".to_string())
}
