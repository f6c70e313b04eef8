use super::*;

/// Tests admin profile passes the admin check.
///
/// Expected: Ok(Profile) with role admin
#[tokio::test]
async fn grants_access_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let admin = factory::create_admin(db).await?;

    AuthSession::new(session).set_profile_id(admin.id).await?;

    let jwt = verifier();
    let headers = HeaderMap::new();
    let profile = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(profile.id, admin.id);
    assert_eq!(profile.role, Role::Admin);

    Ok(())
}

/// Tests sales profile is denied the admin check.
///
/// Expected: Err(AuthError::AccessDenied) mentioning the admin role
#[tokio::test]
async fn denies_access_to_sales() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let sales = factory::create_sales(db).await?;

    let jwt = verifier();
    let headers = bearer(&mint_token(sales.id).unwrap());
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(id, msg))) => {
            assert_eq!(id, sales.id);
            assert!(msg.contains("admin"));
        }
        other => panic!("Expected AccessDenied, got: {:?}", other.map(|p| p.id)),
    }

    Ok(())
}

/// Tests the denial maps to 403.
///
/// Expected: StatusCode::FORBIDDEN
#[tokio::test]
async fn denial_is_forbidden() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let viewer = factory::create_viewer(db).await?;

    let jwt = verifier();
    let headers = bearer(&mint_token(viewer.id).unwrap());
    let error = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await
        .unwrap_err();

    assert_eq!(error.status(), axum::http::StatusCode::FORBIDDEN);

    Ok(())
}
