//! Bearer token verification for identity provider access tokens.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::server::error::auth::AuthError;

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies HS256 access tokens signed with the identity provider's shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Creates a verifier requiring `exp` and `sub`.
    ///
    /// The `aud` claim is only checked when `audience` is set.
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validates `token` and returns the profile id carried in its subject.
    ///
    /// # Returns
    /// - `Ok(Uuid)` - The token is valid and `sub` is a UUID
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired, wrong audience,
    ///   malformed, or a subject that is not a UUID
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "token expired".to_string(),
                ErrorKind::InvalidSignature => "invalid signature".to_string(),
                ErrorKind::InvalidAudience => "invalid audience".to_string(),
                ErrorKind::MissingRequiredClaim(claim) => format!("missing claim {}", claim),
                _ => e.to_string(),
            };
            AuthError::InvalidToken(reason)
        })?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AuthError::InvalidToken(format!("subject '{}' is not a UUID", data.claims.sub)))
    }
}
