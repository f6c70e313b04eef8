//! Company data repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::server::{
    model::{
        company::{
            Company, CompanyDetail, CompanyFilter, CompanyStats, CompanyWithCount,
            CreateCompanyParams, UpdateCompanyParams,
        },
        pagination::{Page, PageParams},
    },
    util::{
        filter::{contains_ci, non_blank},
        time::start_of_month,
    },
};

/// Number of contacts embedded in a company detail response.
pub const DETAIL_CONTACT_LIMIT: u64 = 50;

/// Number of industries reported in company stats.
const TOP_INDUSTRIES: usize = 5;

/// Repository providing database operations for companies.
pub struct CompanyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one page of companies matching `filter`, most recently updated first.
    ///
    /// Each row carries the number of contacts linked to the company, counted in a
    /// second query over the page's ids.
    ///
    /// # Returns
    /// - `Ok(Page<CompanyWithCount>)` - Requested page and total matching rows
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &CompanyFilter,
        params: PageParams,
    ) -> Result<Page<CompanyWithCount>, DbErr> {
        let mut condition = Condition::all();
        if let Some(search) = non_blank(filter.search.as_deref()) {
            condition = condition.add(
                Condition::any()
                    .add(contains_ci(entity::company::Column::Name, search))
                    .add(contains_ci(entity::company::Column::Domain, search)),
            );
        }
        if let Some(industry) = non_blank(filter.industry.as_deref()) {
            condition = condition.add(contains_ci(entity::company::Column::Industry, industry));
        }
        if let Some(city) = non_blank(filter.city.as_deref()) {
            condition = condition.add(contains_ci(entity::company::Column::City, city));
        }

        let paginator = entity::prelude::Company::find()
            .filter(condition)
            .order_by_desc(entity::company::Column::UpdatedAt)
            .order_by_asc(entity::company::Column::Id)
            .paginate(self.db, params.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(params.page_index()).await?;

        let ids: Vec<Uuid> = entities.iter().map(|c| c.id).collect();
        let counts = self.count_contacts(&ids).await?;

        let items = entities
            .into_iter()
            .map(|entity| {
                let contacts_count = counts.get(&entity.id).copied().unwrap_or(0);
                Ok(CompanyWithCount {
                    company: Company::from_entity(entity)?,
                    contacts_count,
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        Ok(Page {
            items,
            total,
            params,
        })
    }

    async fn count_contacts(&self, company_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DbErr> {
        if company_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let linked: Vec<Option<Uuid>> = entity::prelude::Contact::find()
            .select_only()
            .column(entity::contact::Column::CompanyId)
            .filter(entity::contact::Column::CompanyId.is_in(company_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for company_id in linked.into_iter().flatten() {
            *counts.entry(company_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// Finds a company by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DbErr> {
        entity::prelude::Company::find_by_id(id)
            .one(self.db)
            .await?
            .map(Company::from_entity)
            .transpose()
    }

    /// Finds a company with up to 50 of its contacts ordered by last name.
    ///
    /// # Returns
    /// - `Ok(Some(CompanyDetail))` - Company and its first contacts
    /// - `Ok(None)` - No company with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_detail(&self, id: Uuid) -> Result<Option<CompanyDetail>, DbErr> {
        let Some(entity) = entity::prelude::Company::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let contacts = entity::prelude::Contact::find()
            .filter(entity::contact::Column::CompanyId.eq(id))
            .order_by_asc(entity::contact::Column::LastName)
            .order_by_asc(entity::contact::Column::FirstName)
            .limit(DETAIL_CONTACT_LIMIT)
            .all(self.db)
            .await?;

        Ok(Some(CompanyDetail {
            company: Company::from_entity(entity)?,
            contacts,
        }))
    }

    /// Loads company rows for a set of ids, keyed by id.
    pub async fn find_models_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, entity::company::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = entity::prelude::Company::find()
            .filter(entity::company::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(|m| (m.id, m)).collect())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Company::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Computes totals and the five most common industries.
    ///
    /// Companies without an industry are left out of the industry breakdown. Ties
    /// are ordered by industry name.
    ///
    /// # Arguments
    /// - `now` - Reference time for the "new this month" window
    pub async fn get_stats(&self, now: DateTime<Utc>) -> Result<CompanyStats, DbErr> {
        let total = entity::prelude::Company::find().count(self.db).await?;

        let new_this_month = entity::prelude::Company::find()
            .filter(entity::company::Column::CreatedAt.gte(start_of_month(now)))
            .count(self.db)
            .await?;

        let industries: Vec<Option<String>> = entity::prelude::Company::find()
            .select_only()
            .column(entity::company::Column::Industry)
            .filter(entity::company::Column::Industry.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for industry in industries.into_iter().flatten() {
            *counts.entry(industry).or_insert(0) += 1;
        }

        let mut by_industry: Vec<(String, u64)> = counts.into_iter().collect();
        by_industry.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        by_industry.truncate(TOP_INDUSTRIES);

        Ok(CompanyStats {
            total,
            new_this_month,
            by_industry,
        })
    }

    /// Creates a new company.
    ///
    /// # Returns
    /// - `Ok(Company)` - The created company
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateCompanyParams) -> Result<Company, DbErr> {
        let now = Utc::now();
        let entity = entity::company::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            domain: ActiveValue::Set(params.domain),
            industry: ActiveValue::Set(params.industry),
            size: ActiveValue::Set(params.size.map(|s| s.as_str().to_string())),
            website: ActiveValue::Set(params.website),
            phone: ActiveValue::Set(params.phone),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            country: ActiveValue::Set(params.country),
            logo_url: ActiveValue::Set(params.logo_url),
            annual_revenue: ActiveValue::Set(params.annual_revenue),
            notes: ActiveValue::Set(params.notes),
            created_by: ActiveValue::Set(Some(params.created_by)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Company::from_entity(entity)
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Company))` - Updated company
    /// - `Ok(None)` - No company with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateCompanyParams,
    ) -> Result<Option<Company>, DbErr> {
        let Some(company) = entity::prelude::Company::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::company::ActiveModel = company.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(domain) = params.domain {
            active_model.domain = ActiveValue::Set(domain);
        }
        if let Some(industry) = params.industry {
            active_model.industry = ActiveValue::Set(industry);
        }
        if let Some(size) = params.size {
            active_model.size = ActiveValue::Set(size.map(|s| s.as_str().to_string()));
        }
        if let Some(website) = params.website {
            active_model.website = ActiveValue::Set(website);
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(phone);
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
        if let Some(logo_url) = params.logo_url {
            active_model.logo_url = ActiveValue::Set(logo_url);
        }
        if let Some(annual_revenue) = params.annual_revenue {
            active_model.annual_revenue = ActiveValue::Set(annual_revenue);
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(notes);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Company::from_entity(entity).map(Some)
    }

    /// Deletes a company; linked contacts and leads keep existing unlinked.
    ///
    /// # Returns
    /// - `Ok(true)` - Company deleted
    /// - `Ok(false)` - No company with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Company::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
