use super::*;

/// Tests a successful invitation.
///
/// The provider returns the new account id and a profile is stored with the
/// invited role and name.
///
/// Expected: Ok with the provider's id and a stored sales profile
#[tokio::test]
async fn stores_profile_for_invited_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/invite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "email": "new@acme.io"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let identity = identity(&server);

    let invited = ProfileService::new(db, &identity)
        .invite(
            InviteProfileParams {
                email: "new@acme.io".to_string(),
                full_name: "New Seller".to_string(),
                role: Role::Sales,
            },
            REDIRECT,
        )
        .await?;

    assert_eq!(invited, id);
    let stored = ProfileRepository::new(db).find_by_id(id).await?.unwrap();
    assert_eq!(stored.role, Role::Sales);
    assert_eq!(stored.full_name, "New Seller");
    assert_eq!(stored.email.as_deref(), Some("new@acme.io"));

    Ok(())
}

/// Tests that invitations cannot grant the admin role.
///
/// The provider must not be called.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_admin_invitation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let identity = identity(&server);

    let result = ProfileService::new(db, &identity)
        .invite(
            InviteProfileParams {
                email: "boss@acme.io".to_string(),
                full_name: "Boss".to_string(),
                role: Role::Admin,
            },
            REDIRECT,
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests inviting an email the provider already knows.
///
/// Expected: Err(AppError::Conflict) and no profile stored
#[tokio::test]
async fn already_registered_is_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invite"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "msg": "User already registered"
        })))
        .mount(&server)
        .await;
    let identity = identity(&server);

    let result = ProfileService::new(db, &identity)
        .invite(
            InviteProfileParams {
                email: "taken@acme.io".to_string(),
                full_name: "Taken".to_string(),
                role: Role::Viewer,
            },
            REDIRECT,
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(ProfileRepository::new(db).get_all().await?.is_empty());

    Ok(())
}
