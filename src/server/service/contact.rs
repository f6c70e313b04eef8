use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{company::CompanyRepository, contact::ContactRepository, profile::ProfileRepository},
    error::AppError,
    model::{
        contact::{
            Contact, ContactFilter, ContactStats, ContactWithRelations, CreateContactParams,
            UpdateContactParams,
        },
        pagination::{Page, PageParams},
    },
    util::validate,
};

/// Largest page size accepted by the contact list.
pub const MAX_PAGE_LIMIT: u64 = 100;

pub struct ContactService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContactService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        filter: &ContactFilter,
        params: PageParams,
    ) -> Result<Page<ContactWithRelations>, AppError> {
        Ok(ContactRepository::new(self.db)
            .get_paginated(filter, params)
            .await?)
    }

    pub async fn stats(&self) -> Result<ContactStats, AppError> {
        Ok(ContactRepository::new(self.db).get_stats(Utc::now()).await?)
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - No such contact
    pub async fn get(&self, id: Uuid) -> Result<ContactWithRelations, AppError> {
        ContactRepository::new(self.db)
            .find_with_relations(id)
            .await?
            .ok_or_else(not_found)
    }

    /// # Returns
    /// - `Ok(Contact)` - The created contact
    /// - `Err(AppError::BadRequest)` - Validation failed or a referenced row is missing
    /// - `Err(AppError::Conflict)` - Another contact has the same email
    pub async fn create(&self, params: CreateContactParams) -> Result<Contact, AppError> {
        validate::required("first_name", &params.first_name, 100)?;
        validate::required("last_name", &params.last_name, 100)?;
        self.validate_fields(
            None,
            params.email.as_deref(),
            &FieldRefs {
                job_title: params.job_title.as_deref(),
                department: params.department.as_deref(),
                city: params.city.as_deref(),
                country: params.country.as_deref(),
                tags: Some(params.tags.as_slice()),
            },
        )
        .await?;
        self.check_references(params.company_id, params.assigned_to)
            .await?;

        let contact = ContactRepository::new(self.db).create(params).await?;

        tracing::debug!("Contact {} created", contact.id);

        Ok(contact)
    }

    /// # Returns
    /// - `Ok(Contact)` - The updated contact
    /// - `Err(AppError::NotFound)` - No such contact
    /// - `Err(AppError::BadRequest)` - Validation failed or a referenced row is missing
    /// - `Err(AppError::Conflict)` - Another contact has the same email
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateContactParams,
    ) -> Result<Contact, AppError> {
        let contact_repo = ContactRepository::new(self.db);

        if !contact_repo.exists(id).await? {
            return Err(not_found());
        }

        if let Some(first_name) = params.first_name.as_deref() {
            validate::required("first_name", first_name, 100)?;
        }
        if let Some(last_name) = params.last_name.as_deref() {
            validate::required("last_name", last_name, 100)?;
        }
        self.validate_fields(
            Some(id),
            params.email.as_ref().and_then(Option::as_deref),
            &FieldRefs {
                job_title: params.job_title.as_ref().and_then(Option::as_deref),
                department: params.department.as_ref().and_then(Option::as_deref),
                city: params.city.as_ref().and_then(Option::as_deref),
                country: params.country.as_ref().and_then(Option::as_deref),
                tags: params.tags.as_deref(),
            },
        )
        .await?;
        self.check_references(params.company_id.flatten(), params.assigned_to.flatten())
            .await?;

        contact_repo.update(id, params).await?.ok_or_else(not_found)
    }

    /// Deletes a contact with its interactions; its leads are unlinked.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such contact
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !ContactRepository::new(self.db).delete(id).await? {
            return Err(not_found());
        }

        tracing::info!("Contact {} deleted", id);

        Ok(())
    }

    async fn validate_fields(
        &self,
        exclude: Option<Uuid>,
        email: Option<&str>,
        fields: &FieldRefs<'_>,
    ) -> Result<(), AppError> {
        validate::max_len("email", email, 255)?;
        validate::email("email", email)?;
        validate::max_len("job_title", fields.job_title, 100)?;
        validate::max_len("department", fields.department, 100)?;
        validate::max_len("city", fields.city, 100)?;
        validate::max_len("country", fields.country, 100)?;
        for tag in fields.tags.unwrap_or_default() {
            validate::required("tags", tag, 50)?;
        }

        if let Some(email) = email {
            if ContactRepository::new(self.db)
                .email_taken(email, exclude)
                .await?
            {
                return Err(AppError::Conflict(
                    "A contact with this email already exists".to_string(),
                ));
            }
        }

        Ok(())
    }

    async fn check_references(
        &self,
        company_id: Option<Uuid>,
        assigned_to: Option<Uuid>,
    ) -> Result<(), AppError> {
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

struct FieldRefs<'a> {
    job_title: Option<&'a str>,
    department: Option<&'a str>,
    city: Option<&'a str>,
    country: Option<&'a str>,
    tags: Option<&'a [String]>,
}

fn not_found() -> AppError {
    AppError::NotFound("Contact not found".to_string())
}
