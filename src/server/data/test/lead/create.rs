use super::*;

/// Tests creating a lead.
///
/// Expected: Ok with status and assignee persisted
#[tokio::test]
async fn creates_lead() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = LeadRepository::new(db);
    let lead = repo
        .create(CreateLeadParams {
            title: "Support renewal".to_string(),
            status: LeadStatus::Qualified,
            value: Some(12_000.0),
            probability: 40,
            expected_close_date: None,
            contact_id: None,
            company_id: None,
            assigned_to: Some(sales.id),
            source: Some("website".to_string()),
            lost_reason: None,
            notes: None,
            created_by: sales.id,
        })
        .await?;

    assert_eq!(lead.status, LeadStatus::Qualified);
    assert_eq!(lead.assigned_to, Some(sales.id));
    assert_eq!(lead.value, Some(12_000.0));

    Ok(())
}
