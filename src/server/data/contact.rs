//! Contact data repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    data::{company::CompanyRepository, profile::ProfileRepository},
    model::{
        contact::{
            Contact, ContactFilter, ContactSortField, ContactStats, ContactWithRelations,
            CreateContactParams, SortDir, UpdateContactParams,
        },
        pagination::{Page, PageParams},
    },
    util::{
        filter::{contains_ci, non_blank},
        time::start_of_month,
    },
};

/// Repository providing database operations for contacts.
pub struct ContactRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContactRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one page of contacts matching `filter` in the requested order.
    ///
    /// Company and assignee rows for the page are loaded in one query each.
    ///
    /// # Returns
    /// - `Ok(Page<ContactWithRelations>)` - Requested page and total matching rows
    /// - `Err(DbErr)` - Database error during query, or malformed stored tags
    pub async fn get_paginated(
        &self,
        filter: &ContactFilter,
        params: PageParams,
    ) -> Result<Page<ContactWithRelations>, DbErr> {
        let mut condition = Condition::all();
        if let Some(search) = non_blank(filter.search.as_deref()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(entity::contact::Column::FirstName, search))
                    .add(contains_ci(entity::contact::Column::LastName, search))
                    .add(contains_ci(entity::contact::Column::Email, search))
                    .add(contains_ci(entity::contact::Column::JobTitle, search)),
            );
        }
        if let Some(company_id) = filter.company_id {
            condition = condition.add(entity::contact::Column::CompanyId.eq(company_id));
        }
        if let Some(assigned_to) = filter.assigned_to {
            condition = condition.add(entity::contact::Column::AssignedTo.eq(assigned_to));
        }
        if let Some(is_subscribed) = filter.is_subscribed {
            condition = condition.add(entity::contact::Column::IsSubscribed.eq(is_subscribed));
        }
        if let Some(city) = non_blank(filter.city.as_deref()) {
            condition = condition.add(contains_ci(entity::contact::Column::City, city));
        }

        let column = match filter.sort_by {
            ContactSortField::FirstName => entity::contact::Column::FirstName,
            ContactSortField::LastName => entity::contact::Column::LastName,
            ContactSortField::Email => entity::contact::Column::Email,
            ContactSortField::City => entity::contact::Column::City,
            ContactSortField::CreatedAt => entity::contact::Column::CreatedAt,
            ContactSortField::UpdatedAt => entity::contact::Column::UpdatedAt,
        };
        let order = match filter.sort_dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };

        let paginator = entity::prelude::Contact::find()
            .filter(condition)
            .order_by(column, order)
            .order_by_asc(entity::contact::Column::Id)
            .paginate(self.db, params.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(params.page_index()).await?;
        let items = self.with_relations(entities).await?;

        Ok(Page {
            items,
            total,
            params,
        })
    }

    async fn with_relations(
        &self,
        entities: Vec<entity::contact::Model>,
    ) -> Result<Vec<ContactWithRelations>, DbErr> {
        let company_ids: Vec<Uuid> = entities.iter().filter_map(|c| c.company_id).collect();
        let assignee_ids: Vec<Uuid> = entities.iter().filter_map(|c| c.assigned_to).collect();

        let companies = CompanyRepository::new(self.db)
            .find_models_by_ids(&company_ids)
            .await?;
        let assignees = ProfileRepository::new(self.db)
            .find_models_by_ids(&assignee_ids)
            .await?;

        entities
            .into_iter()
            .map(|entity| {
                let company = entity.company_id.and_then(|id| companies.get(&id).cloned());
                let assignee = entity.assigned_to.and_then(|id| assignees.get(&id).cloned());
                Ok(ContactWithRelations {
                    contact: Contact::from_entity(entity)?,
                    company,
                    assignee,
                })
            })
            .collect()
    }

    /// Finds a contact with its company and assignee.
    ///
    /// # Returns
    /// - `Ok(Some(ContactWithRelations))` - Contact found
    /// - `Ok(None)` - No contact with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactWithRelations>, DbErr> {
        let Some(entity) = entity::prelude::Contact::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_relations(vec![entity]).await?.into_iter().next())
    }

    /// Loads contact rows for a set of ids, keyed by id.
    pub async fn find_models_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, entity::contact::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = entity::prelude::Contact::find()
            .filter(entity::contact::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Contact::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Checks whether another contact already uses `email`.
    ///
    /// # Arguments
    /// - `email` - Address to look for, compared exactly
    /// - `exclude` - Contact to ignore, used when updating
    pub async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Contact::find().filter(entity::contact::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(entity::contact::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Counts all, subscribed and this month's contacts.
    pub async fn get_stats(&self, now: DateTime<Utc>) -> Result<ContactStats, DbErr> {
        let total = entity::prelude::Contact::find().count(self.db).await?;

        let subscribed = entity::prelude::Contact::find()
            .filter(entity::contact::Column::IsSubscribed.eq(true))
            .count(self.db)
            .await?;

        let new_this_month = entity::prelude::Contact::find()
            .filter(entity::contact::Column::CreatedAt.gte(start_of_month(now)))
            .count(self.db)
            .await?;

        Ok(ContactStats {
            total,
            subscribed,
            new_this_month,
        })
    }

    /// Counts every contact.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Contact::find().count(self.db).await
    }

    /// Creates a new contact.
    ///
    /// # Returns
    /// - `Ok(Contact)` - The created contact
    /// - `Err(DbErr)` - Database error, including a unique violation on email
    pub async fn create(&self, params: CreateContactParams) -> Result<Contact, DbErr> {
        let now = Utc::now();
        let entity = entity::contact::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            mobile: ActiveValue::Set(params.mobile),
            job_title: ActiveValue::Set(params.job_title),
            department: ActiveValue::Set(params.department),
            company_id: ActiveValue::Set(params.company_id),
            avatar_url: ActiveValue::Set(params.avatar_url),
            linkedin_url: ActiveValue::Set(params.linkedin_url),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            country: ActiveValue::Set(params.country),
            tags: ActiveValue::Set(serde_json::json!(params.tags)),
            is_subscribed: ActiveValue::Set(params.is_subscribed),
            notes: ActiveValue::Set(params.notes),
            assigned_to: ActiveValue::Set(params.assigned_to),
            created_by: ActiveValue::Set(Some(params.created_by)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Contact::from_entity(entity)
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Contact))` - Updated contact
    /// - `Ok(None)` - No contact with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateContactParams,
    ) -> Result<Option<Contact>, DbErr> {
        let Some(contact) = entity::prelude::Contact::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::contact::ActiveModel = contact.into();
        if let Some(first_name) = params.first_name {
            active_model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active_model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = params.email {
            active_model.email = ActiveValue::Set(email);
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(phone);
        }
        if let Some(mobile) = params.mobile {
            active_model.mobile = ActiveValue::Set(mobile);
        }
        if let Some(job_title) = params.job_title {
            active_model.job_title = ActiveValue::Set(job_title);
        }
        if let Some(department) = params.department {
            active_model.department = ActiveValue::Set(department);
        }
        if let Some(company_id) = params.company_id {
            active_model.company_id = ActiveValue::Set(company_id);
        }
        if let Some(avatar_url) = params.avatar_url {
            active_model.avatar_url = ActiveValue::Set(avatar_url);
        }
        if let Some(linkedin_url) = params.linkedin_url {
            active_model.linkedin_url = ActiveValue::Set(linkedin_url);
        }
        if let Some(address) = params.address {
            active_model.address = ActiveValue::Set(address);
        }
        if let Some(city) = params.city {
            active_model.city = ActiveValue::Set(city);
        }
        if let Some(country) = params.country {
            active_model.country = ActiveValue::Set(country);
        }
        if let Some(tags) = params.tags {
            active_model.tags = ActiveValue::Set(serde_json::json!(tags));
        }
        if let Some(is_subscribed) = params.is_subscribed {
            active_model.is_subscribed = ActiveValue::Set(is_subscribed);
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(notes);
        }
        if let Some(assigned_to) = params.assigned_to {
            active_model.assigned_to = ActiveValue::Set(assigned_to);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Contact::from_entity(entity).map(Some)
    }

    /// Deletes a contact.
    ///
    /// Its interactions are removed and its leads are unlinked by the foreign keys.
    ///
    /// # Returns
    /// - `Ok(true)` - Contact deleted
    /// - `Ok(false)` - No contact with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Contact::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
