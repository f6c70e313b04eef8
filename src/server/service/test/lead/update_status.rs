use super::*;

/// Tests moving a lead to `lost` with a reason.
///
/// Expected: Ok with the new stage and the reason stored
#[tokio::test]
async fn moves_lead_and_records_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let lead = factory::lead::LeadFactory::new(db)
        .assigned_to(sales.id)
        .build()
        .await?;
    let caller = Profile::from_entity(sales)?;

    let result = LeadService::new(db)
        .update_status(
            &caller,
            lead.id,
            LeadStatus::Lost,
            Some("Budget cut".to_string()),
        )
        .await?;

    assert_eq!(result.lead.status, LeadStatus::Lost);
    assert_eq!(result.lead.lost_reason.as_deref(), Some("Budget cut"));

    Ok(())
}

/// Tests that a sales user cannot move another user's lead.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn refuses_invisible_lead() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let caller = Profile::from_entity(factory::create_sales(db).await?)?;
    let other = factory::create_sales(db).await?;
    let lead = factory::lead::LeadFactory::new(db)
        .assigned_to(other.id)
        .build()
        .await?;

    let result = LeadService::new(db)
        .update_status(&caller, lead.id, LeadStatus::Won, None)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that a partial update leaves other fields alone.
///
/// Expected: Ok with only the value changed
#[tokio::test]
async fn update_changes_only_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;
    let lead = factory::lead::LeadFactory::new(db)
        .title("Keep me")
        .probability(40)
        .build()
        .await?;

    let result = LeadService::new(db)
        .update(
            &admin,
            lead.id,
            UpdateLeadParams {
                value: Some(Some(900.0)),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(result.lead.title, "Keep me");
    assert_eq!(result.lead.probability, 40);
    assert_eq!(result.lead.value, Some(900.0));

    Ok(())
}
