use super::*;

/// Tests admin detection on an empty database.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_profiles() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProfileRepository::new(db);
    assert!(!repo.admin_exists().await?);

    Ok(())
}

/// Tests that non-admin roles do not count as admins.
///
/// Expected: Ok(false) with sales and viewer profiles, Ok(true) once an admin exists
#[tokio::test]
async fn only_admin_role_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_sales(db).await?;
    factory::create_viewer(db).await?;

    let repo = ProfileRepository::new(db);
    assert!(!repo.admin_exists().await?);

    factory::create_admin(db).await?;
    assert!(repo.admin_exists().await?);

    Ok(())
}
