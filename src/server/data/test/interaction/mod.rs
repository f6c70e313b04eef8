use crate::{
    model::interaction::{Direction, InteractionKind},
    server::{
        data::interaction::InteractionRepository,
        model::interaction::{CreateInteractionParams, TimelineSubject},
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod count_since;
mod create;
mod delete;
mod get_timeline;
