use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::Duration;
use uuid::Uuid;

use crate::{
    model::profile::Role,
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::{AuthGuard, Permission},
            session::AuthSession,
        },
        service::auth::token::JwtVerifier,
    },
};
use test_utils::{
    builder::TestBuilder,
    factory,
    token::{mint_token, mint_token_with, TEST_JWT_SECRET},
};

mod caller;
mod require;

fn verifier() -> JwtVerifier {
    JwtVerifier::new(TEST_JWT_SECRET, None)
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
