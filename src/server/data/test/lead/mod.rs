use crate::{
    model::lead::LeadStatus,
    server::{
        data::lead::LeadRepository,
        model::{
            lead::{CreateLeadParams, LeadFilter, LeadScope, LeadVisibility, UpdateLeadParams},
            pagination::PageParams,
        },
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod find_with_relations;
mod get_all_visible;
mod get_paginated;
mod get_stats;
mod get_status_totals;
mod get_top_commercials;
mod update;

fn page(page: u64, limit: u64) -> PageParams {
    PageParams { page, limit }
}
