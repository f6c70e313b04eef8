use super::*;

/// Tests resolving the caller from a session login.
///
/// Expected: Ok(Profile) for the profile stored in the session
#[tokio::test]
async fn resolves_session_profile() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let viewer = factory::create_viewer(db).await?;

    AuthSession::new(session).set_profile_id(viewer.id).await?;

    let jwt = verifier();
    let headers = HeaderMap::new();
    let profile = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await?;

    assert_eq!(profile.id, viewer.id);
    assert_eq!(profile.role, Role::Viewer);

    Ok(())
}

/// Tests resolving the caller from a bearer token.
///
/// Expected: Ok(Profile) for the token subject
#[tokio::test]
async fn resolves_bearer_profile() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let sales = factory::create_sales(db).await?;

    let jwt = verifier();
    let headers = bearer(&mint_token(sales.id).unwrap());
    let profile = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await?;

    assert_eq!(profile.id, sales.id);

    Ok(())
}

/// Tests that the bearer token wins over the session.
///
/// Expected: Ok(Profile) for the token subject, not the session profile
#[tokio::test]
async fn bearer_takes_precedence_over_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let in_session = factory::create_viewer(db).await?;
    let in_token = factory::create_admin(db).await?;

    AuthSession::new(session).set_profile_id(in_session.id).await?;

    let jwt = verifier();
    let headers = bearer(&mint_token(in_token.id).unwrap());
    let profile = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await?;

    assert_eq!(profile.id, in_token.id);

    Ok(())
}

/// Tests a request without credentials.
///
/// Expected: Err(AuthError::NotAuthenticated)
#[tokio::test]
async fn rejects_anonymous_request() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let jwt = verifier();
    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotAuthenticated))
    ));

    Ok(())
}

/// Tests an expired bearer token alongside a valid session.
///
/// Expected: Err(AuthError::InvalidToken) without falling back to the session
#[tokio::test]
async fn rejects_expired_token_even_with_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let profile = factory::create_sales(db).await?;

    AuthSession::new(session).set_profile_id(profile.id).await?;

    let jwt = verifier();
    let expired =
        mint_token_with(profile.id, TEST_JWT_SECRET, Duration::hours(-1), None).unwrap();
    let headers = bearer(&expired);
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token whose subject has no profile.
///
/// Expected: Err(AuthError::ProfileNotFound) carrying the subject
#[tokio::test]
async fn rejects_unknown_profile() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let unknown = Uuid::new_v4();

    let jwt = verifier();
    let headers = bearer(&mint_token(unknown).unwrap());
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::ProfileNotFound(id))) => assert_eq!(id, unknown),
        other => panic!("Expected ProfileNotFound, got: {:?}", other.map(|p| p.id)),
    }

    Ok(())
}

/// Tests a deactivated profile.
///
/// Expected: Err(AuthError::AccountDisabled)
#[tokio::test]
async fn rejects_disabled_profile() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let disabled = factory::profile::ProfileFactory::new(db)
        .role("admin")
        .is_active(false)
        .build()
        .await?;

    let jwt = verifier();
    let headers = bearer(&mint_token(disabled.id).unwrap());
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountDisabled(_)))
    ));

    Ok(())
}
