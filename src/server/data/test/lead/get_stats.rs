use super::*;

/// Tests lead totals for an admin.
///
/// Verifies won revenue, pipeline value over every stage (won and lost
/// included) and the rounded conversion rate.
///
/// Expected: Ok with the aggregated figures
#[tokio::test]
async fn computes_admin_stats() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::lead::LeadFactory::new(db)
        .status("won")
        .value(1000.0)
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .status("lost")
        .value(500.0)
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .status("proposal")
        .value(300.0)
        .timestamps(now - Duration::days(400))
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let stats = repo.get_stats(LeadScope::All, now).await?;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.won, 1);
    assert_eq!(stats.lost, 1);
    assert_eq!(stats.revenue_won, 1000.0);
    assert_eq!(stats.pipeline_value, 1800.0);
    assert_eq!(stats.new_this_month, 2);
    assert_eq!(stats.conversion_rate, 33);

    Ok(())
}

/// Tests that non-admin stats only cover leads assigned to the caller.
///
/// Unassigned leads are visible in lists but excluded from personal figures.
///
/// Expected: Ok with only the caller's lead counted
#[tokio::test]
async fn scopes_to_assignee() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_sales(db).await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(me.id)
        .status("won")
        .value(200.0)
        .build()
        .await?;
    factory::create_lead(db).await?;

    factory::lead::LeadFactory::new(db)
        .status("negotiation")
        .value(900.0)
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let stats = repo.get_stats(LeadScope::AssignedTo(me.id), Utc::now()).await?;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.pipeline_value, 200.0);
    assert_eq!(stats.conversion_rate, 100);

    Ok(())
}

/// Tests stats with no leads.
///
/// Expected: Ok with zeros and a 0 conversion rate
#[tokio::test]
async fn empty_database_yields_zeros() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeadRepository::new(db);
    let stats = repo.get_stats(LeadScope::All, Utc::now()).await?;

    assert_eq!(stats.total, 0);
    assert_eq!(stats.conversion_rate, 0);

    Ok(())
}
