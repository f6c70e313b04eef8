//! Lead data repository for database operations.
//!
//! Every read takes either a `LeadVisibility` (row-level access for lists and
//! single lookups) or a `LeadScope` (the narrower set used for aggregate figures).
//! Aggregates load the few columns they need and fold them in memory.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    model::lead::LeadStatus,
    server::{
        data::{company::CompanyRepository, contact::ContactRepository, profile::ProfileRepository},
        model::{
            dashboard::TopCommercial,
            lead::{
                CreateLeadParams, Lead, LeadFilter, LeadScope, LeadStats, LeadVisibility,
                LeadWithRelations, StatusTotals, UpdateLeadParams,
            },
            pagination::{Page, PageParams},
            parse_column,
        },
        util::{
            filter::{contains_ci, non_blank},
            time::{conversion_rate, start_of_month},
        },
    },
};

/// Repository providing database operations for leads.
pub struct LeadRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeadRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one page of visible leads matching `filter`, most recently updated first.
    ///
    /// The visibility condition is applied before any filter. `filter.assigned_to`
    /// only narrows the result for admins.
    ///
    /// # Returns
    /// - `Ok(Page<LeadWithRelations>)` - Requested page and total matching rows
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        visibility: LeadVisibility,
        filter: &LeadFilter,
        params: PageParams,
    ) -> Result<Page<LeadWithRelations>, DbErr> {
        let mut condition = visibility.condition();
        if visibility.is_admin() {
            if let Some(assigned_to) = filter.assigned_to {
                condition = condition.add(entity::lead::Column::AssignedTo.eq(assigned_to));
            }
        }
        if let Some(search) = non_blank(filter.search.as_deref()) {
            condition = condition.add(contains_ci(entity::lead::Column::Title, search));
        }
        if let Some(status) = filter.status {
            condition = condition.add(entity::lead::Column::Status.eq(status.as_str()));
        }
        if let Some(contact_id) = filter.contact_id {
            condition = condition.add(entity::lead::Column::ContactId.eq(contact_id));
        }
        if let Some(company_id) = filter.company_id {
            condition = condition.add(entity::lead::Column::CompanyId.eq(company_id));
        }

        let paginator = entity::prelude::Lead::find()
            .filter(condition)
            .order_by_desc(entity::lead::Column::UpdatedAt)
            .order_by_asc(entity::lead::Column::Id)
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

    /// Gets every visible lead, most recently updated first.
    ///
    /// Feeds the pipeline board, which groups the result by stage.
    pub async fn get_all_visible(
        &self,
        visibility: LeadVisibility,
    ) -> Result<Vec<LeadWithRelations>, DbErr> {
        let entities = entity::prelude::Lead::find()
            .filter(visibility.condition())
            .order_by_desc(entity::lead::Column::UpdatedAt)
            .order_by_asc(entity::lead::Column::Id)
            .all(self.db)
            .await?;

        self.with_relations(entities).await
    }

    async fn with_relations(
        &self,
        entities: Vec<entity::lead::Model>,
    ) -> Result<Vec<LeadWithRelations>, DbErr> {
        let contact_ids: Vec<Uuid> = entities.iter().filter_map(|l| l.contact_id).collect();
        let company_ids: Vec<Uuid> = entities.iter().filter_map(|l| l.company_id).collect();
        let assignee_ids: Vec<Uuid> = entities.iter().filter_map(|l| l.assigned_to).collect();

        let contacts = ContactRepository::new(self.db)
            .find_models_by_ids(&contact_ids)
            .await?;
        let companies = CompanyRepository::new(self.db)
            .find_models_by_ids(&company_ids)
            .await?;
        let assignees = ProfileRepository::new(self.db)
            .find_models_by_ids(&assignee_ids)
            .await?;

        entities
            .into_iter()
            .map(|entity| {
                let contact = entity.contact_id.and_then(|id| contacts.get(&id).cloned());
                let company = entity.company_id.and_then(|id| companies.get(&id).cloned());
                let assignee = entity.assigned_to.and_then(|id| assignees.get(&id).cloned());
                Ok(LeadWithRelations {
                    lead: Lead::from_entity(entity)?,
                    contact,
                    company,
                    assignee,
                })
            })
            .collect()
    }

    /// Finds a lead by id regardless of visibility.
    ///
    /// Callers decide between 403 and 404 with `LeadVisibility::can_see`.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, DbErr> {
        entity::prelude::Lead::find_by_id(id)
            .one(self.db)
            .await?
            .map(Lead::from_entity)
            .transpose()
    }

    /// Finds a lead with its contact, company and assignee rows.
    pub async fn find_with_relations(&self, id: Uuid) -> Result<Option<LeadWithRelations>, DbErr> {
        let Some(entity) = entity::prelude::Lead::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_relations(vec![entity]).await?.into_iter().next())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = entity::prelude::Lead::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    async fn scoped_rows(
        &self,
        scope: LeadScope,
    ) -> Result<Vec<(LeadStatus, Option<f64>, DateTime<Utc>)>, DbErr> {
        let rows: Vec<(String, Option<f64>, DateTime<Utc>)> = entity::prelude::Lead::find()
            .select_only()
            .column(entity::lead::Column::Status)
            .column(entity::lead::Column::Value)
            .column(entity::lead::Column::CreatedAt)
            .filter(scope.condition())
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, value, created_at)| {
                Ok((parse_column("lead.status", &status)?, value, created_at))
            })
            .collect()
    }

    /// Computes lead totals for `scope`.
    ///
    /// `pipeline_value` sums the value of every lead in scope, whatever its stage.
    ///
    /// # Arguments
    /// - `scope` - All leads for admins, otherwise the caller's own
    /// - `now` - Reference time for the "new this month" window
    pub async fn get_stats(&self, scope: LeadScope, now: DateTime<Utc>) -> Result<LeadStats, DbErr> {
        let month_start = start_of_month(now);
        let rows = self.scoped_rows(scope).await?;

        let mut stats = LeadStats {
            total: rows.len() as u64,
            won: 0,
            lost: 0,
            revenue_won: 0.0,
            pipeline_value: 0.0,
            new_this_month: 0,
            conversion_rate: 0,
        };

        for (status, value, created_at) in rows {
            let value = value.unwrap_or(0.0);
            stats.pipeline_value += value;
            match status {
                LeadStatus::Won => {
                    stats.won += 1;
                    stats.revenue_won += value;
                }
                LeadStatus::Lost => stats.lost += 1,
                _ => {}
            }
            if created_at >= month_start {
                stats.new_this_month += 1;
            }
        }
        stats.conversion_rate = conversion_rate(stats.won, stats.total);

        Ok(stats)
    }

    /// Count and summed value per stage, in pipeline order with empty stages included.
    pub async fn get_status_totals(&self, scope: LeadScope) -> Result<Vec<StatusTotals>, DbErr> {
        let rows = self.scoped_rows(scope).await?;

        let mut totals: Vec<StatusTotals> = LeadStatus::PIPELINE
            .into_iter()
            .map(|status| StatusTotals {
                status,
                count: 0,
                value: 0.0,
            })
            .collect();

        for (status, value, _) in rows {
            if let Some(entry) = totals.iter_mut().find(|t| t.status == status) {
                entry.count += 1;
                entry.value += value.unwrap_or(0.0);
            }
        }

        Ok(totals)
    }

    /// Ranks assignees by the revenue of their won leads.
    ///
    /// Ties are broken by won count, then by name.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of assignees returned
    pub async fn get_top_commercials(&self, limit: usize) -> Result<Vec<TopCommercial>, DbErr> {
        let rows: Vec<(Option<Uuid>, Option<f64>)> = entity::prelude::Lead::find()
            .select_only()
            .column(entity::lead::Column::AssignedTo)
            .column(entity::lead::Column::Value)
            .filter(entity::lead::Column::Status.eq(LeadStatus::Won.as_str()))
            .filter(entity::lead::Column::AssignedTo.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        let mut totals: HashMap<Uuid, (u64, f64)> = HashMap::new();
        for (assigned_to, value) in rows {
            if let Some(assigned_to) = assigned_to {
                let entry = totals.entry(assigned_to).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += value.unwrap_or(0.0);
            }
        }

        let ids: Vec<Uuid> = totals.keys().copied().collect();
        let profiles = ProfileRepository::new(self.db)
            .find_models_by_ids(&ids)
            .await?;

        let mut ranked: Vec<TopCommercial> = totals
            .into_iter()
            .filter_map(|(id, (won_count, revenue))| {
                profiles.get(&id).map(|profile| TopCommercial {
                    id,
                    full_name: profile.full_name.clone(),
                    avatar_url: profile.avatar_url.clone(),
                    won_count,
                    revenue,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.revenue
                .total_cmp(&a.revenue)
                .then_with(|| b.won_count.cmp(&a.won_count))
                .then_with(|| a.full_name.cmp(&b.full_name))
        });
        ranked.truncate(limit);

        Ok(ranked)
    }

    /// Creates a new lead.
    pub async fn create(&self, params: CreateLeadParams) -> Result<Lead, DbErr> {
        let now = Utc::now();
        let entity = entity::lead::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(params.title),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            value: ActiveValue::Set(params.value),
            probability: ActiveValue::Set(params.probability),
            expected_close_date: ActiveValue::Set(params.expected_close_date),
            contact_id: ActiveValue::Set(params.contact_id),
            company_id: ActiveValue::Set(params.company_id),
            assigned_to: ActiveValue::Set(params.assigned_to),
            source: ActiveValue::Set(params.source),
            lost_reason: ActiveValue::Set(params.lost_reason),
            notes: ActiveValue::Set(params.notes),
            created_by: ActiveValue::Set(Some(params.created_by)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Lead::from_entity(entity)
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Some(Lead))` - Updated lead
    /// - `Ok(None)` - No lead with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, id: Uuid, params: UpdateLeadParams) -> Result<Option<Lead>, DbErr> {
        let Some(lead) = entity::prelude::Lead::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::lead::ActiveModel = lead.into();
        if let Some(title) = params.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(value) = params.value {
            active_model.value = ActiveValue::Set(value);
        }
        if let Some(probability) = params.probability {
            active_model.probability = ActiveValue::Set(probability);
        }
        if let Some(date) = params.expected_close_date {
            active_model.expected_close_date = ActiveValue::Set(date);
        }
        if let Some(contact_id) = params.contact_id {
            active_model.contact_id = ActiveValue::Set(contact_id);
        }
        if let Some(company_id) = params.company_id {
            active_model.company_id = ActiveValue::Set(company_id);
        }
        if let Some(assigned_to) = params.assigned_to {
            active_model.assigned_to = ActiveValue::Set(assigned_to);
        }
        if let Some(source) = params.source {
            active_model.source = ActiveValue::Set(source);
        }
        if let Some(lost_reason) = params.lost_reason {
            active_model.lost_reason = ActiveValue::Set(lost_reason);
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(notes);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Lead::from_entity(entity).map(Some)
    }

    /// Moves a lead to `status`, recording `lost_reason` when given.
    ///
    /// # Returns
    /// - `Ok(Some(Lead))` - Updated lead
    /// - `Ok(None)` - No lead with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_status(
        &self,
        id: Uuid,
        status: LeadStatus,
        lost_reason: Option<String>,
    ) -> Result<Option<Lead>, DbErr> {
        self.update(
            id,
            UpdateLeadParams {
                status: Some(status),
                lost_reason: lost_reason.map(Some),
                ..Default::default()
            },
        )
        .await
    }

    /// Deletes a lead together with its interactions.
    ///
    /// # Returns
    /// - `Ok(true)` - Lead deleted
    /// - `Ok(false)` - No lead with that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Lead::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

