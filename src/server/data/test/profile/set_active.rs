use super::*;

/// Tests deactivating and reactivating a profile.
///
/// Expected: Ok with `is_active` toggled each time
#[tokio::test]
async fn toggles_activation() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = ProfileRepository::new(db);
    let disabled = repo.set_active(sales.id, false).await?.unwrap();
    assert!(!disabled.is_active);

    let enabled = repo.set_active(sales.id, true).await?.unwrap();
    assert!(enabled.is_active);

    Ok(())
}
