use crate::{
    model::lead::{CreateLeadDto, LeadStatus},
    server::{
        error::AppError,
        model::{
            lead::{CreateLeadParams, UpdateLeadParams},
            profile::Profile,
        },
        service::lead::LeadService,
    },
};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod create;
mod get;
mod pipeline;
mod update_status;
