use super::*;

/// Tests the per-stage breakdown.
///
/// Verifies that all seven stages are present in pipeline order, empty ones
/// with zeros.
///
/// Expected: Ok with counts and values per stage
#[tokio::test]
async fn includes_every_stage_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for value in [100.0, 250.0] {
        factory::lead::LeadFactory::new(db)
            .status("negotiation")
            .value(value)
            .build()
            .await?;
    }
    factory::create_lead(db).await?;

    let repo = LeadRepository::new(db);
    let totals = repo.get_status_totals(LeadScope::All).await?;

    let stages: Vec<LeadStatus> = totals.iter().map(|t| t.status).collect();
    assert_eq!(stages, LeadStatus::PIPELINE.to_vec());

    let negotiation = totals
        .iter()
        .find(|t| t.status == LeadStatus::Negotiation)
        .unwrap();
    assert_eq!(negotiation.count, 2);
    assert_eq!(negotiation.value, 350.0);

    let won = totals.iter().find(|t| t.status == LeadStatus::Won).unwrap();
    assert_eq!(won.count, 0);

    Ok(())
}
