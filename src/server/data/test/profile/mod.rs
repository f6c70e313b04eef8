use crate::{
    model::profile::Role,
    server::{
        data::profile::ProfileRepository,
        model::profile::{UpdateProfileParams, UpsertProfileParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod admin_exists;
mod delete;
mod set_active;
mod set_role;
