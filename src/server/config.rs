use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,

    /// Public base URL of this API, used for the admin login link.
    pub app_url: String,
    /// Dashboard origin; CORS is restricted to it and logins redirect back to it.
    pub frontend_url: String,

    pub idp_jwt_secret: String,
    pub idp_jwt_audience: Option<String>,

    pub idp_client_id: String,
    pub idp_client_secret: String,
    pub idp_auth_url: String,
    pub idp_token_url: String,
    pub idp_userinfo_url: String,
    pub idp_redirect_url: String,

    pub idp_admin_url: String,
    pub idp_service_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            bind_addr,
            app_url: trim_url(require("APP_URL")?),
            frontend_url: trim_url(require("FRONTEND_URL")?),
            idp_jwt_secret: require("IDP_JWT_SECRET")?,
            idp_jwt_audience: get("IDP_JWT_AUDIENCE"),
            idp_client_id: require("IDP_CLIENT_ID")?,
            idp_client_secret: require("IDP_CLIENT_SECRET")?,
            idp_auth_url: require("IDP_AUTH_URL")?,
            idp_token_url: require("IDP_TOKEN_URL")?,
            idp_userinfo_url: require("IDP_USERINFO_URL")?,
            idp_redirect_url: require("IDP_REDIRECT_URL")?,
            idp_admin_url: trim_url(require("IDP_ADMIN_URL")?),
            idp_service_key: require("IDP_SERVICE_KEY")?,
        })
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
