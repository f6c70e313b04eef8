use crate::{
    model::profile::Role,
    server::{
        data::profile::ProfileRepository,
        error::AppError,
        model::profile::{InviteProfileParams, Profile},
        service::{identity::IdentityAdminClient, profile::ProfileService},
    },
};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

mod delete;
mod invite;

const REDIRECT: &str = "http://localhost:3000/auth/update-password";

fn identity(server: &MockServer) -> IdentityAdminClient {
    IdentityAdminClient::new(
        reqwest::Client::new(),
        server.uri(),
        "service-key".to_string(),
    )
}
