use super::*;

/// Tests a partial lead update.
///
/// Expected: Ok with probability changed and title kept
#[tokio::test]
async fn updates_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::create_lead(db).await?;

    let repo = LeadRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateLeadParams {
                probability: Some(75),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.title, original.title);
    assert_eq!(updated.probability, 75);

    Ok(())
}

/// Tests clearing nullable columns with an explicit null.
///
/// Expected: Ok with value and assignee cleared and probability kept
#[tokio::test]
async fn clears_fields_set_to_null() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_sales(db).await?;
    let original = factory::lead::LeadFactory::new(db)
        .value(1200.0)
        .probability(60)
        .assigned_to(owner.id)
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateLeadParams {
                value: Some(None),
                assigned_to: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.value, None);
    assert_eq!(updated.assigned_to, None);
    assert_eq!(updated.probability, 60);

    Ok(())
}

/// Tests moving a lead to `lost` with a reason.
///
/// Expected: Ok with status and lost reason written
#[tokio::test]
async fn moves_lead_to_lost_with_reason() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::create_lead(db).await?;

    let repo = LeadRepository::new(db);
    let updated = repo
        .update_status(
            original.id,
            LeadStatus::Lost,
            Some("Budget cut".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, LeadStatus::Lost);
    assert_eq!(updated.lost_reason.as_deref(), Some("Budget cut"));

    Ok(())
}

/// Tests changing the status of an unknown lead.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_lead() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeadRepository::new(db);
    let result = repo
        .update_status(Uuid::new_v4(), LeadStatus::Won, None)
        .await?;

    assert!(result.is_none());

    Ok(())
}
