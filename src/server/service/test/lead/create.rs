use super::*;

/// Tests lead creation defaults.
///
/// A lead created without a stage or assignee starts in `new` and is assigned
/// to its creator.
///
/// Expected: Ok with status `new` and the creator as assignee
#[tokio::test]
async fn applies_creation_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let params = CreateLeadParams::from_dto(
        CreateLeadDto {
            title: "Website redesign".to_string(),
            value: Some(12_000.0),
            ..Default::default()
        },
        sales.id,
    );

    let lead = LeadService::new(db).create(params).await?;

    assert_eq!(lead.lead.title, "Website redesign");
    assert_eq!(lead.lead.status, LeadStatus::New);
    assert_eq!(lead.lead.probability, 0);
    assert_eq!(lead.lead.assigned_to, Some(sales.id));
    assert_eq!(lead.assignee.map(|a| a.id), Some(sales.id));

    Ok(())
}

/// Tests that an out-of-range probability is rejected before any write.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_probability_above_100() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let params = CreateLeadParams::from_dto(
        CreateLeadDto {
            title: "Too sure".to_string(),
            probability: Some(101),
            ..Default::default()
        },
        sales.id,
    );

    let result = LeadService::new(db).create(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that a reference to a missing company is a client error.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_unknown_company() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let params = CreateLeadParams::from_dto(
        CreateLeadDto {
            title: "Orphan".to_string(),
            company_id: Some(Uuid::new_v4()),
            ..Default::default()
        },
        sales.id,
    );

    let result = LeadService::new(db).create(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
