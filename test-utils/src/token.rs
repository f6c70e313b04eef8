//! Bearer token minting for tests.
//!
//! Produces HS256 tokens shaped like the identity provider's access tokens so that
//! tests can authenticate through the `Authorization` header.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

use crate::error::TestError;

/// Shared secret used by test configurations.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-enough-entropy";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<String>,
}

/// Mints a token for `profile_id` valid for one hour, signed with `TEST_JWT_SECRET`.
pub fn mint_token(profile_id: Uuid) -> Result<String, TestError> {
    mint_token_with(profile_id, TEST_JWT_SECRET, Duration::hours(1), None)
}

/// Mints a token with an explicit secret, lifetime and audience.
///
/// A negative `ttl` yields an already expired token.
pub fn mint_token_with(
    profile_id: Uuid,
    secret: &str,
    ttl: Duration,
    audience: Option<&str>,
) -> Result<String, TestError> {
    mint_raw_token(&profile_id.to_string(), secret, ttl, audience)
}

/// Mints a token with an arbitrary `sub` claim.
pub fn mint_raw_token(
    subject: &str,
    secret: &str,
    ttl: Duration,
    audience: Option<&str>,
) -> Result<String, TestError> {
    let claims = TestClaims {
        sub: subject.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
        aud: audience.map(str::to_string),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
