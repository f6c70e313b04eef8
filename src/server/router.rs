use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{self, callback, get_me, login, logout, update_me},
        company::{
            self, create_company, delete_company, get_companies, get_company, get_company_stats,
            update_company,
        },
        contact::{
            self, create_contact, delete_contact, get_contact, get_contact_stats, get_contacts,
            update_contact,
        },
        dashboard::{self, get_activity, get_kpis, get_leads_by_status, get_top_commercials},
        interaction::{self, create_interaction, delete_interaction, get_timeline},
        lead::{
            self, create_lead, delete_lead, get_lead, get_lead_stats, get_leads, get_pipeline,
            update_lead, update_lead_status,
        },
        user::{self, delete_user, get_users, invite, update_active, update_role},
    },
    state::AppState,
};


#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM API",
        description = "Companies, contacts, leads, interactions and dashboard figures."
    ),
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_me,
        auth::update_me,
        user::get_users,
        user::update_role,
        user::update_active,
        user::invite,
        user::delete_user,
        company::get_companies,
        company::get_company_stats,
        company::get_company,
        company::create_company,
        company::update_company,
        company::delete_company,
        contact::get_contacts,
        contact::get_contact_stats,
        contact::get_contact,
        contact::create_contact,
        contact::update_contact,
        contact::delete_contact,
        lead::get_leads,
        lead::get_lead_stats,
        lead::get_lead,
        lead::create_lead,
        lead::update_lead,
        lead::update_lead_status,
        lead::delete_lead,
        lead::get_pipeline,
        interaction::get_timeline,
        interaction::create_interaction,
        interaction::delete_interaction,
        dashboard::get_kpis,
        dashboard::get_leads_by_status,
        dashboard::get_activity,
        dashboard::get_top_commercials,
    ),
    tags(
        (name = "auth", description = "Login flow and own profile"),
        (name = "user", description = "User administration"),
        (name = "company", description = "Companies"),
        (name = "contact", description = "Contacts"),
        (name = "lead", description = "Leads and pipeline"),
        (name = "interaction", description = "Interaction timeline"),
        (name = "dashboard", description = "Dashboard figures"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the identity provider bearer token and the session cookie.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token issued by the identity provider"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("id"))),
            );
        }
    }
}

/// API routes and the Swagger UI.
///
/// Session, CORS, tracing and rate limiting layers are added by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", get(login))
        .route("/api/v1/auth/callback", get(callback))
        .route("/api/v1/auth/logout", get(logout))
        .route("/api/v1/auth/me", get(get_me).patch(update_me))
        .route("/api/v1/auth/users", get(get_users))
        .route("/api/v1/auth/users/{id}", delete(delete_user))
        .route("/api/v1/auth/users/{id}/role", patch(update_role))
        .route("/api/v1/auth/users/{id}/active", patch(update_active))
        .route("/api/v1/auth/invite", post(invite))
        .route("/api/v1/companies", get(get_companies).post(create_company))
        .route("/api/v1/companies/stats", get(get_company_stats))
        .route(
            "/api/v1/companies/{id}",
            get(get_company)
                .patch(update_company)
                .delete(delete_company),
        )
        .route("/api/v1/contacts", get(get_contacts).post(create_contact))
        .route("/api/v1/contacts/stats", get(get_contact_stats))
        .route(
            "/api/v1/contacts/{id}",
            get(get_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
        .route("/api/v1/leads", get(get_leads).post(create_lead))
        .route("/api/v1/leads/stats", get(get_lead_stats))
        .route(
            "/api/v1/leads/{id}",
            get(get_lead).patch(update_lead).delete(delete_lead),
        )
        .route("/api/v1/leads/{id}/status", patch(update_lead_status))
        .route("/api/v1/pipeline", get(get_pipeline))
        .route("/api/v1/interactions", post(create_interaction))
        .route("/api/v1/interactions/timeline", get(get_timeline))
        .route("/api/v1/interactions/{id}", delete(delete_interaction))
        .route("/api/v1/dashboard/kpis", get(get_kpis))
        .route("/api/v1/dashboard/leads-by-status", get(get_leads_by_status))
        .route("/api/v1/dashboard/activity", get(get_activity))
        .route("/api/v1/dashboard/top-commercials", get(get_top_commercials))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
