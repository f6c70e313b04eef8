//! Client for the identity provider's admin API.
//!
//! Invitations and account deletion go through the provider's service-key protected
//! endpoints; everything else about identity (passwords, sessions, MFA) stays with the
//! provider.

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::server::error::identity::IdentityError;

#[derive(Debug, Deserialize)]
struct InvitedUser {
    id: Uuid,
}

/// Error payload of the admin API. Providers differ in which keys they fill.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
    code: Option<serde_json::Value>,
}

impl ErrorBody {
    fn text(&self) -> String {
        [&self.message, &self.msg, &self.error_description, &self.error]
            .into_iter()
            .find_map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Whether the provider refused because the email already has an account.
    fn is_already_registered(&self) -> bool {
        let code = self
            .error_code
            .as_deref()
            .or_else(|| self.code.as_ref().and_then(|c| c.as_str()));
        if matches!(code, Some("email_exists" | "user_already_exists")) {
            return true;
        }

        let text = self.text().to_lowercase();
        text.contains("already")
            && (text.contains("registered") || text.contains("exists"))
    }
}

#[derive(Clone)]
pub struct IdentityAdminClient {
    http_client: reqwest::Client,
    admin_url: String,
    service_key: String,
}

impl IdentityAdminClient {
    pub fn new(http_client: reqwest::Client, admin_url: String, service_key: String) -> Self {
        Self {
            http_client,
            admin_url: admin_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    /// Sends an invitation email and returns the id of the created account.
    ///
    /// # Arguments
    /// - `email` - Address to invite
    /// - `full_name` - Stored as user metadata on the account
    /// - `redirect_to` - Where the invitation link lands after the password is set
    ///
    /// # Returns
    /// - `Ok(Uuid)` - Account id assigned by the provider
    /// - `Err(IdentityError::AlreadyRegistered)` - The email already has an account
    /// - `Err(IdentityError::Rejected)` - Any other non-success answer
    /// - `Err(IdentityError::Request)` - Network or decoding failure
    pub async fn invite(
        &self,
        email: &str,
        full_name: &str,
        redirect_to: &str,
    ) -> Result<Uuid, IdentityError> {
        let response = self
            .http_client
            .post(format!("{}/invite", self.admin_url))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&json!({
                "email": email,
                "data": { "full_name": full_name },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: ErrorBody = response.json().await.unwrap_or_default();

            if body.is_already_registered() {
                return Err(IdentityError::AlreadyRegistered);
            }
            return Err(IdentityError::Rejected {
                status,
                message: body.text(),
            });
        }

        let user: InvitedUser = response.json().await?;

        Ok(user.id)
    }

    /// Deletes an account. An account the provider no longer knows counts as deleted.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), IdentityError> {
        let response = self
            .http_client
            .delete(format!("{}/admin/users/{}", self.admin_url, id))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();

        Err(IdentityError::Rejected {
            status: status.as_u16(),
            message: body.text(),
        })
    }
}
