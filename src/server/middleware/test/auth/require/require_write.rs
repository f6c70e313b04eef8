use super::*;

/// Tests admin and sales profiles pass the write check.
///
/// Expected: Ok(Profile) for both
#[tokio::test]
async fn grants_write_to_admin_and_sales() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let admin = factory::create_admin(db).await?;
    let sales = factory::create_sales(db).await?;

    let jwt = verifier();
    for id in [admin.id, sales.id] {
        let headers = bearer(&mint_token(id).unwrap());
        let profile = AuthGuard::new(db, &jwt, &headers, session)
            .require(&[Permission::Write])
            .await?;
        assert_eq!(profile.id, id);
    }

    Ok(())
}

/// Tests viewer profile is denied write access.
///
/// Expected: Err(AuthError::AccessDenied) mentioning write access
#[tokio::test]
async fn denies_write_to_viewer() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let viewer = factory::create_viewer(db).await?;

    AuthSession::new(session).set_profile_id(viewer.id).await?;

    let jwt = verifier();
    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Write])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(id, msg))) => {
            assert_eq!(id, viewer.id);
            assert!(msg.contains("write"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|p| p.id)),
    }

    Ok(())
}
