use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::profile::ProfileRepository,
    error::{config::ConfigError, internal::InternalError, AppError},
    service::admin_code::{admin_login_link, AdminCodeService},
    state::OAuth2Client,
};

/// Sessions expire after this many days without a request.
pub const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Sustained request rate per client IP.
const RATE_LIMIT_PER_SECOND: u64 = 10;
/// Requests a client IP may burst above the sustained rate.
const RATE_LIMIT_BURST: u32 = 100;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false)
        .map_sqlx_sqlite_opts(|o| o.with_regexp());

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session store on the application database's pool.
///
/// The session table is created on first start.
pub async fn connect_to_session_store(db: &DatabaseConnection) -> Result<SqliteStore, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(session_store)
}

/// Cookie session layer with a seven day inactivity expiry.
///
/// Cookies are marked secure when the API is served over HTTPS.
pub fn session_layer(store: SqliteStore, config: &Config) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            SESSION_INACTIVITY_DAYS,
        )))
}

/// HTTP client for identity provider calls; redirects are never followed.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    build_oauth_client(
        &config.idp_client_id,
        &config.idp_client_secret,
        &config.idp_auth_url,
        &config.idp_token_url,
        &config.idp_redirect_url,
    )
}

/// Builds the authorization-code client for the identity provider.
///
/// # Returns
/// - `Err(ConfigError::InvalidEnvVar)` - One of the URLs does not parse
pub fn build_oauth_client(
    client_id: &str,
    client_secret: &str,
    auth_url: &str,
    token_url: &str,
    redirect_url: &str,
) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, e: url::ParseError| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    };

    let auth_url =
        AuthUrl::new(auth_url.to_string()).map_err(|e| invalid("IDP_AUTH_URL", e))?;
    let token_url =
        TokenUrl::new(token_url.to_string()).map_err(|e| invalid("IDP_TOKEN_URL", e))?;
    let redirect_url = RedirectUrl::new(redirect_url.to_string())
        .map_err(|e| invalid("IDP_REDIRECT_URL", e))?;

    Ok(BasicClient::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url))
}

/// CORS for the dashboard origin, with credentials so the session cookie is sent.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(frontend_url).map_err(|e| ConfigError::InvalidEnvVar {
        name: "FRONTEND_URL".to_string(),
        reason: e.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]))
}

/// Limits requests per client IP.
///
/// The router must be served with `into_make_service_with_connect_info::<SocketAddr>`
/// so the peer address is available.
pub fn with_rate_limit(router: Router) -> Result<Router, AppError> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_PER_SECOND)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or(InternalError::RateLimiterConfig)?;

    Ok(router.layer(GovernorLayer::new(Arc::new(governor_conf))))
}

/// Logs a one-time admin login link when no admin profile exists yet.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    if ProfileRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.issue().await;

    tracing::info!(
        "No admin found, log in within 60 seconds to become admin: {}",
        admin_login_link(&config.app_url, &code)
    );

    Ok(())
}
