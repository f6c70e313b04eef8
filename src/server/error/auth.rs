use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Neither a bearer token nor a session identified the caller.
    #[error("Request carried no credentials")]
    NotAuthenticated,

    /// The bearer token failed signature, expiry or audience validation, or its
    /// subject is not a UUID.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// The caller's identity has no CRM profile.
    #[error("Profile {0} not found")]
    ProfileNotFound(Uuid),

    /// The caller's profile has been deactivated by an admin.
    #[error("Profile {0} is disabled")]
    AccountDisabled(Uuid),

    /// The caller lacks a required permission.
    ///
    /// Contains the profile id and a description of the refused action for logging.
    #[error("Profile {0} denied: {1}")]
    AccessDenied(Uuid, String),

    /// CSRF state in the OAuth callback does not match the session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// The identity provider refused the authorization code exchange.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated
            | Self::InvalidToken(_)
            | Self::ProfileNotFound(_)
            | Self::AccountDisabled(_) => StatusCode::UNAUTHORIZED,
            Self::AccessDenied(..) => StatusCode::FORBIDDEN,
            Self::CsrfValidationFailed | Self::TokenExchange(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level; clients get short fixed messages.
///
/// # Returns
/// - 400 Bad Request - CSRF or code exchange failures during login
/// - 401 Unauthorized - Missing or invalid credentials, unknown or disabled profile
/// - 403 Forbidden - Insufficient role
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let message = match &self {
            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidToken(_) => "Invalid or expired token",
            Self::ProfileNotFound(_) => "Profile not found",
            Self::AccountDisabled(_) => "Account disabled",
            Self::AccessDenied(..) => "Insufficient permissions",
            Self::CsrfValidationFailed | Self::TokenExchange(_) => {
                "There was an issue logging you in, please try again."
            }
        };

        (
            self.status(),
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
