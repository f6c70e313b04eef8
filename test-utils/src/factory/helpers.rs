//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a company with one contact and one lead linked to both.
///
/// The lead is assigned to `assignee` when provided.
///
/// # Returns
/// - `Ok((company, contact, lead))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_lead_with_dependencies(
    db: &DatabaseConnection,
    assignee: Option<uuid::Uuid>,
) -> Result<
    (
        entity::company::Model,
        entity::contact::Model,
        entity::lead::Model,
    ),
    DbErr,
> {
    let company = crate::factory::company::create_company(db).await?;
    let contact = crate::factory::contact::ContactFactory::new(db)
        .company_id(company.id)
        .build()
        .await?;

    let mut lead = crate::factory::lead::LeadFactory::new(db)
        .contact_id(contact.id)
        .company_id(company.id);
    if let Some(assignee) = assignee {
        lead = lead.assigned_to(assignee);
    }
    let lead = lead.build().await?;

    Ok((company, contact, lead))
}
