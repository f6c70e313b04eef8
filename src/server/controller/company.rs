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
        api::{DeletedDto, ErrorDto, PaginatedDto},
        company::{
            CompanyDetailDto, CompanyDto, CompanyListItemDto, CompanyStatsDto, CreateCompanyDto,
            UpdateCompanyDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            company::{CompanyFilter, CreateCompanyParams, UpdateCompanyParams},
            pagination::PageParams,
        },
        service::company::{CompanyService, MAX_PAGE_LIMIT},
        state::AppState,
    },
};

/// Tag for grouping company endpoints in OpenAPI documentation
pub static COMPANY_TAG: &str = "company";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyListQuery {
    /// Case-insensitive match on name or domain.
    pub search: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<u64>,
    /// Items per page, 1 to 500 (default: 20)
    pub limit: Option<u64>,
}

/// List companies, most recently updated first.
///
/// # Returns
/// - `200 OK` - One page of companies with their contact counts
/// - `400 Bad Request` - Invalid page or limit
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = COMPANY_TAG,
    params(CompanyListQuery),
    responses(
        (status = 200, description = "One page of companies", body = PaginatedDto<CompanyListItemDto>),
        (status = 400, description = "Invalid pagination", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_companies(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let params = PageParams::new(query.page, query.limit, MAX_PAGE_LIMIT)?;
    let filter = CompanyFilter {
        search: query.search,
        industry: query.industry,
        city: query.city,
    };

    let page = CompanyService::new(&state.db).list(&filter, params).await?;

    let pagination = page.pagination();
    Ok(Json(PaginatedDto {
        data: page.items.into_iter().map(|c| c.into_dto()).collect(),
        pagination,
    }))
}

/// Company totals and the five most common industries.
#[utoipa::path(
    get,
    path = "/api/v1/companies/stats",
    tag = COMPANY_TAG,
    responses(
        (status = 200, description = "Company statistics", body = CompanyStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_company_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let stats = CompanyService::new(&state.db).stats().await?;

    Ok(Json(stats.into_dto()))
}

/// Get a company with up to 50 of its contacts.
#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company with contacts", body = CompanyDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let company = CompanyService::new(&state.db).get(id).await?;

    Ok(Json(company.into_dto()))
}

/// Create a company.
///
/// # Access Control
/// - `Write` - Admins and sales users
///
/// # Returns
/// - `201 Created` - The created company
/// - `400 Bad Request` - Invalid field
/// - `403 Forbidden` - Viewer role
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    tag = COMPANY_TAG,
    request_body = CreateCompanyDto,
    responses(
        (status = 201, description = "Created company", body = CompanyDto),
        (status = 400, description = "Invalid field", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn create_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<CreateCompanyDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let params = CreateCompanyParams::from_dto(payload, caller.id);
    let company = CompanyService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(company.into_dto())))
}

/// Update a company; absent fields are left unchanged.
///
/// # Access Control
/// - `Write` - Admins and sales users
#[utoipa::path(
    patch,
    path = "/api/v1/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = Uuid, Path, description = "Company id")),
    request_body = UpdateCompanyDto,
    responses(
        (status = 200, description = "Updated company", body = CompanyDto),
        (status = 400, description = "Invalid field", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let company = CompanyService::new(&state.db)
        .update(id, UpdateCompanyParams::from_dto(payload))
        .await?;

    Ok(Json(company.into_dto()))
}

/// Delete a company; its contacts and leads are kept and unlinked.
///
/// # Access Control
/// - `Admin` - Only admins can delete companies
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    tag = COMPANY_TAG,
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted", body = DeletedDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "Company not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn delete_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    CompanyService::new(&state.db).delete(id).await?;

    Ok(Json(DeletedDto {
        message: "Company deleted".to_string(),
        id,
    }))
}
