mod model;
mod server;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler::session_cleanup,
    service::{
        admin_code::AdminCodeService, auth::token::JwtVerifier, identity::IdentityAdminClient,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session_store = startup::connect_to_session_store(&db).await?;
    let session = startup::session_layer(session_store.clone(), &config);
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let cors = startup::cors_layer(&config.frontend_url)?;

    let admin_code_service = AdminCodeService::new();
    let jwt = JwtVerifier::new(&config.idp_jwt_secret, config.idp_jwt_audience.as_deref());
    let identity = IdentityAdminClient::new(
        http_client.clone(),
        config.idp_admin_url.clone(),
        config.idp_service_key.clone(),
    );

    // Check for admin users and generate login link if none exist
    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let _scheduler = session_cleanup::start_scheduler(session_store).await?;

    let app = server::router::router()
        .with_state(AppState::new(
            db,
            http_client,
            oauth_client,
            admin_code_service,
            jwt,
            identity,
            config.idp_userinfo_url.clone(),
            config.frontend_url.clone(),
        ))
        .layer(session)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    let app = startup::with_rate_limit(app)?;

    tracing::info!("Starting server on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
