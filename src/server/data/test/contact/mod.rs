use crate::server::{
    data::contact::ContactRepository,
    model::{
        contact::{
            ContactFilter, ContactSortField, CreateContactParams, SortDir, UpdateContactParams,
        },
        pagination::PageParams,
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod delete;
mod email_taken;
mod find_with_relations;
mod update;

fn page(page: u64, limit: u64) -> PageParams {
    PageParams { page, limit }
}

fn create_params(created_by: Uuid) -> CreateContactParams {
    CreateContactParams {
        first_name: "Marie".to_string(),
        last_name: "Curie".to_string(),
        email: Some("marie@example.com".to_string()),
        phone: None,
        mobile: None,
        job_title: Some("CTO".to_string()),
        department: None,
        company_id: None,
        avatar_url: None,
        linkedin_url: None,
        address: None,
        city: None,
        country: None,
        tags: vec!["vip".to_string(), "lab".to_string()],
        is_subscribed: true,
        notes: None,
        assigned_to: None,
        created_by,
    }
}
