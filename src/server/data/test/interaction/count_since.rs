use super::*;

/// Tests counting interactions in a time window.
///
/// Expected: Ok(1) for the interaction inside the window
#[tokio::test]
async fn counts_only_recent_interactions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let contact = factory::create_contact(db).await?;
    factory::interaction::InteractionFactory::new(db)
        .contact_id(contact.id)
        .occurred_at(now)
        .build()
        .await?;
    factory::interaction::InteractionFactory::new(db)
        .contact_id(contact.id)
        .occurred_at(now - Duration::days(90))
        .build()
        .await?;

    let repo = InteractionRepository::new(db);
    assert_eq!(repo.count_since(now - Duration::days(1)).await?, 1);

    Ok(())
}
