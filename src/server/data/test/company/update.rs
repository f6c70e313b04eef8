use super::*;

/// Tests a partial company update.
///
/// Verifies that provided fields change, others are kept, and `updated_at`
/// moves forward.
///
/// Expected: Ok with name and size updated
#[tokio::test]
async fn updates_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::company::CompanyFactory::new(db)
        .industry("Retail")
        .timestamps(Utc::now() - Duration::days(2))
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateCompanyParams {
                name: Some("Renamed".to_string()),
                size: Some(Some(CompanySize::Enterprise)),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.size, Some(CompanySize::Enterprise));
    assert_eq!(updated.industry.as_deref(), Some("Retail"));
    assert!(updated.updated_at > original.updated_at);

    Ok(())
}

/// Tests clearing nullable columns with an explicit null.
///
/// Expected: Ok with industry and revenue cleared and city kept
#[tokio::test]
async fn clears_fields_set_to_null() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let original = factory::company::CompanyFactory::new(db)
        .industry("Retail")
        .city("Lille")
        .annual_revenue(2_000_000.0)
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let updated = repo
        .update(
            original.id,
            UpdateCompanyParams {
                industry: Some(None),
                annual_revenue: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.industry, None);
    assert_eq!(updated.annual_revenue, None);
    assert_eq!(updated.city.as_deref(), Some("Lille"));

    Ok(())
}

/// Tests updating an unknown company.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_company() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CompanyRepository::new(db);
    let result = repo
        .update(Uuid::new_v4(), UpdateCompanyParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
