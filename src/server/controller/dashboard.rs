use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DataDto, ErrorDto},
        dashboard::{KpisDto, LeadsByStatusDto, TopCommercialDto},
        interaction::ActivityDto,
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::dashboard::DashboardService,
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static DASHBOARD_TAG: &str = "dashboard";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// 1 to 50 (default: 10)
    pub limit: Option<u64>,
}

/// Headline figures.
///
/// Company, contact and interaction counts are global; lead figures are scoped
/// to the caller's leads for non-admins.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/kpis",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "KPIs", body = KpisDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_kpis(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let kpis = DashboardService::new(&state.db).kpis(&caller).await?;

    Ok(Json(kpis.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/leads-by-status",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Count and value per stage", body = Vec<LeadsByStatusDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_leads_by_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let totals = DashboardService::new(&state.db)
        .leads_by_status(&caller)
        .await?;

    let totals: Vec<LeadsByStatusDto> = totals.into_iter().map(|t| t.into_dto()).collect();

    Ok(Json(totals))
}

/// Latest interactions; non-admins only see their own.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/activity",
    tag = DASHBOARD_TAG,
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activity", body = DataDto<ActivityDto>),
        (status = 400, description = "Invalid limit", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let activity = DashboardService::new(&state.db)
        .activity(&caller, query.limit)
        .await?;

    Ok(Json(DataDto {
        data: activity.into_iter().map(|i| i.into_activity_dto()).collect(),
    }))
}

/// Top five assignees by won revenue.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/top-commercials",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Ranking", body = Vec<TopCommercialDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_top_commercials(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let ranking = DashboardService::new(&state.db).top_commercials().await?;

    let ranking: Vec<TopCommercialDto> = ranking.into_iter().map(|t| t.into_dto()).collect();

    Ok(Json(ranking))
}
