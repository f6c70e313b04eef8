use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    model::{
        api::{DataDto, DeletedDto, ErrorDto},
        interaction::{CreateInteractionDto, InteractionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::interaction::{CreateInteractionParams, TimelineSubject},
        service::interaction::InteractionService,
        state::AppState,
    },
};

/// Tag for grouping interaction endpoints in OpenAPI documentation
pub static INTERACTION_TAG: &str = "interaction";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimelineQuery {
    pub contact_id: Option<Uuid>,
    pub lead_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// 1 to 200 (default: 50)
    pub limit: Option<u64>,
}

/// Interactions of one contact, lead or company, latest first.
///
/// Exactly one of `contact_id`, `lead_id` or `company_id` must be given.
///
/// # Returns
/// - `200 OK` - Interactions with author summaries
/// - `400 Bad Request` - Zero or several subjects, or invalid limit
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/v1/interactions/timeline",
    tag = INTERACTION_TAG,
    params(TimelineQuery),
    responses(
        (status = 200, description = "Timeline", body = DataDto<InteractionDto>),
        (status = 400, description = "Invalid subject or limit", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_timeline(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(query): Query<TimelineQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let subject = TimelineSubject::from_ids(query.contact_id, query.lead_id, query.company_id)
        .ok_or_else(|| {
            AppError::BadRequest(
                "Exactly one of contact_id, lead_id or company_id is required".to_string(),
            )
        })?;

    let timeline = InteractionService::new(&state.db)
        .timeline(subject, query.limit)
        .await?;

    Ok(Json(DataDto {
        data: timeline.into_iter().map(|i| i.into_dto()).collect(),
    }))
}

/// Log an interaction authored by the caller.
///
/// # Access Control
/// - `Write` - Admins and sales users
///
/// # Returns
/// - `201 Created` - The created interaction
/// - `400 Bad Request` - No subject, unknown reference or invalid field
#[utoipa::path(
    post,
    path = "/api/v1/interactions",
    tag = INTERACTION_TAG,
    request_body = CreateInteractionDto,
    responses(
        (status = 201, description = "Created interaction", body = InteractionDto),
        (status = 400, description = "Invalid interaction", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn create_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<CreateInteractionDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let params = CreateInteractionParams::from_dto(payload, caller.id);
    let interaction = InteractionService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(interaction.into_dto())))
}

/// Delete an interaction.
///
/// # Access Control
/// - Admins, or the interaction's author
#[utoipa::path(
    delete,
    path = "/api/v1/interactions/{id}",
    tag = INTERACTION_TAG,
    params(("id" = Uuid, Path, description = "Interaction id")),
    responses(
        (status = 200, description = "Interaction deleted", body = DeletedDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Neither admin nor author", body = ErrorDto),
        (status = 404, description = "Interaction not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn delete_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    InteractionService::new(&state.db)
        .delete(&caller, id)
        .await?;

    Ok(Json(DeletedDto {
        message: "Interaction deleted".to_string(),
        id,
    }))
}
