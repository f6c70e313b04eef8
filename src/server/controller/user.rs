use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        profile::{
            InviteResponseDto, InviteUserDto, ProfileDto, SetActiveResponseDto, UpdateActiveDto,
            UpdateRoleDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::profile::InviteProfileParams,
        service::profile::ProfileService,
        state::AppState,
    },
};

/// Tag for grouping user management endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// List every CRM user.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - All profiles, oldest first
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/v1/auth/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All profiles", body = Vec<ProfileDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let profiles = ProfileService::new(&state.db, &state.identity)
        .list()
        .await?;

    let profiles: Vec<ProfileDto> = profiles.into_iter().map(|p| p.into_dto()).collect();

    Ok(Json(profiles))
}

/// Change another user's role.
///
/// # Access Control
/// - `Admin` - Only admins can change roles
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `403 Forbidden` - Not an admin, or the target is the caller
/// - `404 Not Found` - No such user
#[utoipa::path(
    patch,
    path = "/api/v1/auth/users/{id}/role",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated profile", body = ProfileDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or own role", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let profile = ProfileService::new(&state.db, &state.identity)
        .set_role(&caller, id, payload.role)
        .await?;

    Ok(Json(profile.into_dto()))
}

/// Activate or deactivate another user.
///
/// Deactivated users are refused on every authenticated request.
///
/// # Access Control
/// - `Admin` - Only admins can change activation
///
/// # Returns
/// - `200 OK` - Message and updated profile
/// - `403 Forbidden` - Not an admin, or the target is the caller
/// - `404 Not Found` - No such user
#[utoipa::path(
    patch,
    path = "/api/v1/auth/users/{id}/active",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body = UpdateActiveDto,
    responses(
        (status = 200, description = "Updated profile", body = SetActiveResponseDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or own account", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_active(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateActiveDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let profile = ProfileService::new(&state.db, &state.identity)
        .set_active(&caller, id, payload.is_active)
        .await?;

    let message = if profile.is_active {
        "User activated"
    } else {
        "User deactivated"
    };

    Ok(Json(SetActiveResponseDto {
        message: message.to_string(),
        user: profile.into_dto(),
    }))
}

/// Invite a new sales or viewer user by email.
///
/// The invitation link sends the invitee to the dashboard's password page.
///
/// # Access Control
/// - `Admin` - Only admins can invite users
///
/// # Returns
/// - `201 Created` - Invitation sent
/// - `400 Bad Request` - Invalid email, blank name or admin role
/// - `409 Conflict` - Already registered, or the provider refused
#[utoipa::path(
    post,
    path = "/api/v1/auth/invite",
    tag = USER_TAG,
    request_body = InviteUserDto,
    responses(
        (status = 201, description = "Invitation sent", body = InviteResponseDto),
        (status = 400, description = "Invalid invitation", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Already registered or refused", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn invite(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<InviteUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = InviteProfileParams::from_dto(payload);
    let email = params.email.clone();
    let redirect_to = format!("{}/auth/update-password", state.frontend_url);

    let user_id = ProfileService::new(&state.db, &state.identity)
        .invite(params, &redirect_to)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InviteResponseDto {
            message: format!("Invitation sent to {}", email),
            user_id,
        }),
    ))
}

/// Delete another user's account and profile.
///
/// # Access Control
/// - `Admin` - Only admins can delete users
///
/// # Returns
/// - `200 OK` - User deleted
/// - `403 Forbidden` - Not an admin, or the target is the caller
/// - `404 Not Found` - No such user
/// - `409 Conflict` - The identity provider refused the deletion
#[utoipa::path(
    delete,
    path = "/api/v1/auth/users/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or own account", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Identity provider refused", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    ProfileService::new(&state.db, &state.identity)
        .delete(&caller, id)
        .await?;

    Ok(Json(MessageDto {
        message: "User deleted".to_string(),
    }))
}
