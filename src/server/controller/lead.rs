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
        api::{DataDto, DeletedDto, ErrorDto, PaginatedDto},
        lead::{
            CreateLeadDto, LeadStatsDto, LeadStatus, LeadWithRelationsDto, PipelineColumnDto,
            UpdateLeadDto, UpdateLeadStatusDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            lead::{CreateLeadParams, LeadFilter, UpdateLeadParams},
            pagination::PageParams,
        },
        service::lead::{LeadService, MAX_PAGE_LIMIT},
        state::AppState,
    },
};

/// Tag for grouping lead endpoints in OpenAPI documentation
pub static LEAD_TAG: &str = "lead";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadListQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// Only honored for admins.
    pub assigned_to: Option<Uuid>,
    /// 1-based page number (default: 1)
    pub page: Option<u64>,
    /// Items per page, 1 to 100 (default: 20)
    pub limit: Option<u64>,
}

/// List the leads visible to the caller.
///
/// Admins see every lead; other roles see leads assigned to them or unassigned.
///
/// # Returns
/// - `200 OK` - One page of leads with contact, company and assignee summaries
/// - `400 Bad Request` - Invalid pagination or status
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/v1/leads",
    tag = LEAD_TAG,
    params(LeadListQuery),
    responses(
        (status = 200, description = "One page of leads", body = PaginatedDto<LeadWithRelationsDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_leads(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let params = PageParams::new(query.page, query.limit, MAX_PAGE_LIMIT)?;
    let filter = LeadFilter {
        search: query.search,
        status: query.status,
        contact_id: query.contact_id,
        company_id: query.company_id,
        assigned_to: query.assigned_to,
    };

    let page = LeadService::new(&state.db)
        .list(&caller, &filter, params)
        .await?;

    let pagination = page.pagination();
    Ok(Json(PaginatedDto {
        data: page.items.into_iter().map(|l| l.into_dto()).collect(),
        pagination,
    }))
}

/// Lead figures; non-admins only count leads assigned to them.
#[utoipa::path(
    get,
    path = "/api/v1/leads/stats",
    tag = LEAD_TAG,
    responses(
        (status = 200, description = "Lead statistics", body = LeadStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_lead_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let stats = LeadService::new(&state.db).stats(&caller).await?;

    Ok(Json(stats.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/v1/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead with relations", body = LeadWithRelationsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Lead assigned to another user", body = ErrorDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let lead = LeadService::new(&state.db).get(&caller, id).await?;

    Ok(Json(lead.into_dto()))
}

/// Create a lead.
///
/// Defaults to stage `new`, probability 0 and the caller as assignee.
///
/// # Access Control
/// - `Write` - Admins and sales users
///
/// # Returns
/// - `201 Created` - The created lead with relations
/// - `400 Bad Request` - Invalid field or unknown contact/company/assignee
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    tag = LEAD_TAG,
    request_body = CreateLeadDto,
    responses(
        (status = 201, description = "Created lead", body = LeadWithRelationsDto),
        (status = 400, description = "Invalid field or reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn create_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<CreateLeadDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let params = CreateLeadParams::from_dto(payload, caller.id);
    let lead = LeadService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(lead.into_dto())))
}

/// Update a lead; absent fields are left unchanged.
///
/// # Access Control
/// - `Write` - Admins and sales users, limited to visible leads
#[utoipa::path(
    patch,
    path = "/api/v1/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadDto,
    responses(
        (status = 200, description = "Updated lead", body = LeadWithRelationsDto),
        (status = 400, description = "Invalid field or reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required or lead not visible", body = ErrorDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let lead = LeadService::new(&state.db)
        .update(&caller, id, UpdateLeadParams::from_dto(payload))
        .await?;

    Ok(Json(lead.into_dto()))
}

/// Move a lead to another pipeline stage.
///
/// # Access Control
/// - `Write` - Admins and sales users, limited to visible leads
#[utoipa::path(
    patch,
    path = "/api/v1/leads/{id}/status",
    tag = LEAD_TAG,
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadStatusDto,
    responses(
        (status = 200, description = "Moved lead", body = LeadWithRelationsDto),
        (status = 400, description = "Invalid field", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required or lead not visible", body = ErrorDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_lead_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let lead = LeadService::new(&state.db)
        .update_status(&caller, id, payload.status, payload.lost_reason)
        .await?;

    Ok(Json(lead.into_dto()))
}

/// Delete a lead.
///
/// # Access Control
/// - `Admin` - Only admins can delete leads
#[utoipa::path(
    delete,
    path = "/api/v1/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead deleted", body = DeletedDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn delete_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    LeadService::new(&state.db).delete(id).await?;

    Ok(Json(DeletedDto {
        message: "Lead deleted".to_string(),
        id,
    }))
}

/// Visible leads grouped by pipeline stage.
///
/// Every stage is present in pipeline order, empty ones included.
#[utoipa::path(
    get,
    path = "/api/v1/pipeline",
    tag = LEAD_TAG,
    responses(
        (status = 200, description = "Pipeline columns", body = DataDto<PipelineColumnDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_pipeline(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let columns = LeadService::new(&state.db).pipeline(&caller).await?;

    Ok(Json(DataDto {
        data: columns.into_iter().map(|c| c.into_dto()).collect(),
    }))
}
