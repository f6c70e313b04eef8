use super::*;

/// Tests a partial contact update including tags.
///
/// Expected: Ok with tags replaced and names kept
#[tokio::test]
async fn replaces_tags_and_keeps_other_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::create_contact(db).await?;

    let repo = ContactRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateContactParams {
                tags: Some(vec!["partner".to_string()]),
                city: Some(Some("Nantes".to_string())),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name, original.first_name);
    assert_eq!(updated.tags, vec!["partner".to_string()]);
    assert_eq!(updated.city.as_deref(), Some("Nantes"));

    Ok(())
}

/// Tests unlinking a contact from its company and assignee.
///
/// Expected: Ok with company and assignee cleared and email kept
#[tokio::test]
async fn clears_fields_set_to_null() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;
    let owner = factory::create_sales(db).await?;
    let original = factory::contact::ContactFactory::new(db)
        .company_id(company.id)
        .assigned_to(owner.id)
        .build()
        .await?;

    let repo = ContactRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateContactParams {
                company_id: Some(None),
                assigned_to: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.company_id, None);
    assert_eq!(updated.assigned_to, None);
    assert_eq!(updated.email, original.email);

    Ok(())
}

/// Tests updating an unknown contact.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_contact() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ContactRepository::new(db);
    let result = repo
        .update(Uuid::new_v4(), UpdateContactParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
