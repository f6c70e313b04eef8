use super::*;
use sea_orm::EntityTrait;

/// Tests deleting a profile that owns assignments.
///
/// Verifies that the profile row is removed and leads assigned to it are kept
/// with `assigned_to` cleared.
///
/// Expected: Ok(true) and the lead unassigned
#[tokio::test]
async fn deletes_profile_and_unassigns_leads() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let lead = factory::lead::LeadFactory::new(db)
        .assigned_to(sales.id)
        .build()
        .await?;

    let repo = ProfileRepository::new(db);
    assert!(repo.delete(sales.id).await?);
    assert!(repo.find_by_id(sales.id).await?.is_none());

    let lead = entity::prelude::Lead::find_by_id(lead.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(lead.assigned_to, None);

    Ok(())
}

/// Tests deleting an unknown profile.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProfileRepository::new(db);
    assert!(!repo.delete(Uuid::new_v4()).await?);

    Ok(())
}
