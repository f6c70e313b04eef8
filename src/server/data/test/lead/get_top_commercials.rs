use super::*;

/// Tests ranking assignees by won revenue.
///
/// Verifies that only won leads count and that the limit is applied.
///
/// Expected: Ok with the higher earner first and the list capped
#[tokio::test]
async fn ranks_by_won_revenue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let top = factory::create_sales(db).await?;
    let second = factory::create_sales(db).await?;
    let third = factory::create_sales(db).await?;

    for (assignee, value) in [(top.id, 900.0), (second.id, 300.0), (second.id, 200.0), (third.id, 10.0)] {
        factory::lead::LeadFactory::new(db)
            .assigned_to(assignee)
            .status("won")
            .value(value)
            .build()
            .await?;
    }
    factory::lead::LeadFactory::new(db)
        .assigned_to(third.id)
        .status("negotiation")
        .value(10_000.0)
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let ranked = repo.get_top_commercials(2).await?;

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, top.id);
    assert_eq!(ranked[0].revenue, 900.0);
    assert_eq!(ranked[1].id, second.id);
    assert_eq!(ranked[1].won_count, 2);
    assert_eq!(ranked[1].revenue, 500.0);

    Ok(())
}
