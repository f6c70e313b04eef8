use super::*;

mod require_admin;
mod require_write;

/// Tests that every listed permission is checked.
///
/// Verifies that a sales profile passes `Write` but the combined check fails on
/// `Admin`.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn requires_all_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let sales = factory::create_sales(db).await?;

    AuthSession::new(session).set_profile_id(sales.id).await?;

    let jwt = verifier();
    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Write, Permission::Admin])
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

/// Tests empty permission list grants access.
///
/// Verifies that any authenticated, active profile passes when no permission is
/// required, including viewers.
///
/// Expected: Ok(Profile)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let viewer = factory::create_viewer(db).await?;

    AuthSession::new(session).set_profile_id(viewer.id).await?;

    let jwt = verifier();
    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await;

    assert_eq!(result?.id, viewer.id);

    Ok(())
}
