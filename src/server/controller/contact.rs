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
        contact::{
            ContactDetailDto, ContactDto, ContactListItemDto, ContactStatsDto, CreateContactDto,
            UpdateContactDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            contact::{
                ContactFilter, ContactSortField, CreateContactParams, SortDir, UpdateContactParams,
            },
            pagination::PageParams,
        },
        service::contact::{ContactService, MAX_PAGE_LIMIT},
        state::AppState,
    },
};

/// Tag for grouping contact endpoints in OpenAPI documentation
pub static CONTACT_TAG: &str = "contact";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    /// Case-insensitive match on first name, last name, email or job title.
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub is_subscribed: Option<bool>,
    pub city: Option<String>,
    /// One of first_name, last_name, email, city, created_at, updated_at (default: updated_at)
    pub sort_by: Option<String>,
    /// asc or desc (default: desc)
    pub sort_dir: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<u64>,
    /// Items per page, 1 to 100 (default: 20)
    pub limit: Option<u64>,
}

impl ContactListQuery {
    fn filter(&self) -> Result<ContactFilter, AppError> {
        let sort_by = match self.sort_by.as_deref() {
            Some(s) => s.parse::<ContactSortField>().map_err(AppError::BadRequest)?,
            None => ContactSortField::default(),
        };
        let sort_dir = match self.sort_dir.as_deref() {
            Some(s) => s.parse::<SortDir>().map_err(AppError::BadRequest)?,
            None => SortDir::default(),
        };

        Ok(ContactFilter {
            search: self.search.clone(),
            company_id: self.company_id,
            assigned_to: self.assigned_to,
            is_subscribed: self.is_subscribed,
            city: self.city.clone(),
            sort_by,
            sort_dir,
        })
    }
}

/// List contacts with filters and sorting.
///
/// # Returns
/// - `200 OK` - One page of contacts with company summaries
/// - `400 Bad Request` - Invalid pagination or sort field
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    tag = CONTACT_TAG,
    params(ContactListQuery),
    responses(
        (status = 200, description = "One page of contacts", body = PaginatedDto<ContactListItemDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(query): Query<ContactListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let params = PageParams::new(query.page, query.limit, MAX_PAGE_LIMIT)?;
    let filter = query.filter()?;

    let page = ContactService::new(&state.db).list(&filter, params).await?;

    let pagination = page.pagination();
    Ok(Json(PaginatedDto {
        data: page.items.into_iter().map(|c| c.into_list_dto()).collect(),
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/contacts/stats",
    tag = CONTACT_TAG,
    responses(
        (status = 200, description = "Contact statistics", body = ContactStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_contact_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let stats = ContactService::new(&state.db).stats().await?;

    Ok(Json(stats.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    tag = CONTACT_TAG,
    params(("id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact with company and assignee", body = ContactDetailDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Contact not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn get_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let contact = ContactService::new(&state.db).get(id).await?;

    Ok(Json(contact.into_detail_dto()))
}

/// Create a contact.
///
/// # Access Control
/// - `Write` - Admins and sales users
///
/// # Returns
/// - `201 Created` - The created contact
/// - `400 Bad Request` - Invalid field or unknown company/assignee
/// - `409 Conflict` - Email already used by another contact
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    tag = CONTACT_TAG,
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Created contact", body = ContactDto),
        (status = 400, description = "Invalid field or reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto),
        (status = 409, description = "Duplicate email", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<CreateContactDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let params = CreateContactParams::from_dto(payload, caller.id);
    let contact = ContactService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(contact.into_dto())))
}

/// Update a contact; absent fields are left unchanged.
///
/// # Access Control
/// - `Write` - Admins and sales users
#[utoipa::path(
    patch,
    path = "/api/v1/contacts/{id}",
    tag = CONTACT_TAG,
    params(("id" = Uuid, Path, description = "Contact id")),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Updated contact", body = ContactDto),
        (status = 400, description = "Invalid field or reference", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Write access required", body = ErrorDto),
        (status = 404, description = "Contact not found", body = ErrorDto),
        (status = 409, description = "Duplicate email", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn update_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Write])
        .await?;

    let contact = ContactService::new(&state.db)
        .update(id, UpdateContactParams::from_dto(payload))
        .await?;

    Ok(Json(contact.into_dto()))
}

/// Delete a contact with its interactions; its leads are kept and unlinked.
///
/// # Access Control
/// - `Admin` - Only admins can delete contacts
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    tag = CONTACT_TAG,
    params(("id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted", body = DeletedDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Admin access required", body = ErrorDto),
        (status = 404, description = "Contact not found", body = ErrorDto)
    ),
    security(("bearer" = []), ("session" = [])),
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    ContactService::new(&state.db).delete(id).await?;

    Ok(Json(DeletedDto {
        message: "Contact deleted".to_string(),
        id,
    }))
}
