use super::*;

/// Tests a contact timeline.
///
/// Verifies ordering by `occurred_at` descending and that other contacts'
/// interactions are excluded.
///
/// Expected: Ok with the contact's interactions, newest first
#[tokio::test]
async fn returns_subject_interactions_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let contact = factory::create_contact(db).await?;
    let other = factory::create_contact(db).await?;

    let now = Utc::now();
    let older = factory::interaction::InteractionFactory::new(db)
        .contact_id(contact.id)
        .author_id(sales.id)
        .occurred_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::interaction::InteractionFactory::new(db)
        .contact_id(contact.id)
        .author_id(sales.id)
        .occurred_at(now)
        .build()
        .await?;
    factory::create_interaction(db, other.id, sales.id).await?;

    let repo = InteractionRepository::new(db);
    let timeline = repo
        .get_timeline(TimelineSubject::Contact(contact.id), 50)
        .await?;

    let ids: Vec<Uuid> = timeline.iter().map(|i| i.interaction.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(timeline.iter().all(|i| i.author.is_some()));

    Ok(())
}

/// Tests the timeline limit.
///
/// Expected: Ok with at most `limit` interactions
#[tokio::test]
async fn applies_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;
    for _ in 0..3 {
        factory::interaction::InteractionFactory::new(db)
            .company_id(company.id)
            .build()
            .await?;
    }

    let repo = InteractionRepository::new(db);
    let timeline = repo
        .get_timeline(TimelineSubject::Company(company.id), 2)
        .await?;

    assert_eq!(timeline.len(), 2);

    Ok(())
}
