use super::*;

/// Tests promoting a viewer to sales.
///
/// Expected: Ok with the new role persisted
#[tokio::test]
async fn changes_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = factory::create_viewer(db).await?;

    let repo = ProfileRepository::new(db);
    let updated = repo.set_role(viewer.id, Role::Sales).await?.unwrap();
    assert_eq!(updated.role, Role::Sales);

    let reloaded = repo.find_by_id(viewer.id).await?.unwrap();
    assert_eq!(reloaded.role, Role::Sales);

    Ok(())
}

/// Tests changing the role of an unknown profile.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_profile() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProfileRepository::new(db);
    assert!(repo.set_role(Uuid::new_v4(), Role::Admin).await?.is_none());

    Ok(())
}
