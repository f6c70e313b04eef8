use super::*;

/// Tests company totals and the industry breakdown.
///
/// Verifies that companies without an industry are excluded from the
/// breakdown, only the top five industries are kept, and older companies are
/// not counted as new this month.
///
/// Expected: Ok with the expected totals and breakdown order
#[tokio::test]
async fn computes_totals_and_top_industries() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    for (industry, count) in [
        ("Software", 3),
        ("Retail", 2),
        ("Energy", 1),
        ("Finance", 1),
        ("Health", 1),
        ("Media", 1),
    ] {
        for _ in 0..count {
            factory::company::CompanyFactory::new(db)
                .industry(industry)
                .build()
                .await?;
        }
    }
    factory::company::CompanyFactory::new(db)
        .timestamps(now - Duration::days(400))
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let stats = repo.get_stats(now).await?;

    assert_eq!(stats.total, 10);
    assert_eq!(stats.new_this_month, 9);
    assert_eq!(stats.by_industry.len(), 5);
    assert_eq!(stats.by_industry[0], ("Software".to_string(), 3));
    assert_eq!(stats.by_industry[1], ("Retail".to_string(), 2));
    assert!(stats.by_industry.iter().all(|(industry, _)| industry != "Media"));

    Ok(())
}
