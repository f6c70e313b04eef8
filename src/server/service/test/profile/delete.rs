use super::*;

/// Tests deleting another user.
///
/// The provider account is removed first, then the profile.
///
/// Expected: Ok and the profile gone
#[tokio::test]
async fn deletes_account_and_profile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;
    let target = factory::create_sales(db).await?;

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/admin/users/{}", target.id)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let identity = identity(&server);

    ProfileService::new(db, &identity)
        .delete(&admin, target.id)
        .await?;

    assert!(!ProfileRepository::new(db).exists(target.id).await?);

    Ok(())
}

/// Tests that a provider refusal keeps the local profile.
///
/// Expected: Err(AppError::Conflict) and the profile still present
#[tokio::test]
async fn provider_refusal_keeps_profile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;
    let target = factory::create_sales(db).await?;

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;
    let identity = identity(&server);

    let result = ProfileService::new(db, &identity)
        .delete(&admin, target.id)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(ProfileRepository::new(db).exists(target.id).await?);

    Ok(())
}

/// Tests that admins cannot delete themselves.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn refuses_self_deletion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    let identity = identity(&server);

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;

    let result = ProfileService::new(db, &identity)
        .delete(&admin, admin.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
