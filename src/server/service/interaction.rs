use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        company::CompanyRepository, contact::ContactRepository, interaction::InteractionRepository,
        lead::LeadRepository,
    },
    error::AppError,
    model::{
        interaction::{CreateInteractionParams, InteractionWithRelations, TimelineSubject},
        profile::Profile,
    },
    util::validate,
};

pub const DEFAULT_TIMELINE_LIMIT: u64 = 50;
pub const MAX_TIMELINE_LIMIT: u64 = 200;

pub struct InteractionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InteractionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Interactions of one contact, lead or company, latest first.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - `limit` is outside `1..=200`
    pub async fn timeline(
        &self,
        subject: TimelineSubject,
        limit: Option<u64>,
    ) -> Result<Vec<InteractionWithRelations>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_TIMELINE_LIMIT);
        validate::range("limit", Some(limit), 1, MAX_TIMELINE_LIMIT)?;

        Ok(InteractionRepository::new(self.db)
            .get_timeline(subject, limit)
            .await?)
    }

    /// Logs an interaction authored by the caller.
    ///
    /// # Returns
    /// - `Ok(InteractionWithRelations)` - The created interaction
    /// - `Err(AppError::BadRequest)` - No subject, a missing referenced row, or an
    ///   invalid field
    pub async fn create(
        &self,
        params: CreateInteractionParams,
    ) -> Result<InteractionWithRelations, AppError> {
        if !params.has_subject() {
            return Err(AppError::BadRequest(
                "At least one of contact_id, lead_id or company_id is required".to_string(),
            ));
        }
        validate::max_len("subject", params.subject.as_deref(), 255)?;
        validate::non_negative("duration_min", params.duration_min)?;

        if let Some(contact_id) = params.contact_id {
            if !ContactRepository::new(self.db).exists(contact_id).await? {
                return Err(AppError::BadRequest("Contact not found".to_string()));
            }
        }
        if let Some(lead_id) = params.lead_id {
            if !LeadRepository::new(self.db).exists(lead_id).await? {
                return Err(AppError::BadRequest("Lead not found".to_string()));
            }
        }
        if let Some(company_id) = params.company_id {
            if !CompanyRepository::new(self.db).exists(company_id).await? {
                return Err(AppError::BadRequest("Company not found".to_string()));
            }
        }

        Ok(InteractionRepository::new(self.db).create(params).await?)
    }

    /// Deletes an interaction; only admins and its author may do so.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such interaction
    /// - `Err(AppError::Forbidden)` - The caller is neither admin nor author
    pub async fn delete(&self, caller: &Profile, id: Uuid) -> Result<(), AppError> {
        let interaction_repo = InteractionRepository::new(self.db);

        let interaction = interaction_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Interaction not found".to_string()))?;

        if !caller.is_admin() && interaction.author_id != Some(caller.id) {
            return Err(AppError::Forbidden(
                "Only the author or an admin can delete this interaction".to_string(),
            ));
        }

        interaction_repo.delete(id).await?;

        tracing::debug!("Interaction {} deleted by {}", id, caller.id);

        Ok(())
    }
}
