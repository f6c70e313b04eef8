use crate::{
    model::company::CompanySize,
    server::{
        data::company::CompanyRepository,
        model::{
            company::{CompanyFilter, CreateCompanyParams, UpdateCompanyParams},
            pagination::PageParams,
        },
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod delete;
mod find_detail;
mod get_paginated;
mod get_stats;
mod update;

fn page(page: u64, limit: u64) -> PageParams {
    PageParams { page, limit }
}
