use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        profile::{ProfileDto, UpdateMeDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession, OAuthFlowSession},
        },
        model::profile::UpdateProfileParams,
        service::{auth::AuthService, profile::ProfileService},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, IntoParams)]
pub struct LoginParams {
    /// One-time admin bootstrap code from the startup log.
    pub admin_code: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize, IntoParams)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from the identity provider for token exchange.
    pub code: String,
}

/// Starts a login against the identity provider.
///
/// Stores a CSRF token in the session and redirects to the provider's authorize
/// page. An admin code is kept in the session and redeemed by the callback once the
/// profile exists.
///
/// # Returns
/// - `307 Temporary Redirect` - To the identity provider
#[utoipa::path(
    get,
    path = "/api/v1/auth/login",
    tag = AUTH_TAG,
    params(LoginParams),
    responses(
        (status = 307, description = "Redirect to the identity provider"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.userinfo_url,
    );

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    let flow = OAuthFlowSession::new(&session);
    match params.admin_code.as_deref() {
        Some(code) => {
            if !state.admin_code_service.is_pending().await {
                tracing::warn!("Login presented an admin code while none is pending");
            }
            flow.set_admin_code(code).await?;
        }
        None => flow.clear_admin_code().await?,
    }

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes a login and redirects to the dashboard.
///
/// # Returns
/// - `303 See Other` - Logged in, redirect to the dashboard
/// - `400 Bad Request` - CSRF mismatch or failed code exchange
/// - `401 Unauthorized` - The account is disabled
#[utoipa::path(
    get,
    path = "/api/v1/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 303, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "CSRF mismatch or failed code exchange", body = ErrorDto),
        (status = 401, description = "Account disabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let admin_code = OAuthFlowSession::new(&session).take_admin_code().await?;

    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.userinfo_url,
    );
    let profile = auth_service
        .callback(
            params.code,
            admin_code.as_deref(),
            &state.admin_code_service,
        )
        .await?;

    AuthSession::new(&session).set_profile_id(profile.id).await?;

    Ok(Redirect::to(&state.frontend_url))
}

/// Ends the session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok(Json(MessageDto {
        message: "Logged out".to_string(),
    }))
}

/// Returns the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Caller's profile", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let profile = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    Ok(Json(profile.into_dto()))
}

/// Updates the caller's own name, phone or avatar.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Blank name or oversized field
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    patch,
    path = "/api/v1/auth/me",
    tag = AUTH_TAG,
    request_body = UpdateMeDto,
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 400, description = "Invalid field", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<UpdateMeDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let profile = ProfileService::new(&state.db, &state.identity)
        .update_me(&caller, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok(Json(profile.into_dto()))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}
