use super::*;

/// Tests recording a call on a contact.
///
/// Verifies that `occurred_at` defaults to the creation time and the author
/// row is attached.
///
/// Expected: Ok with kind, direction and author set
#[tokio::test]
async fn creates_interaction_with_author() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let contact = factory::create_contact(db).await?;

    let repo = InteractionRepository::new(db);
    let created = repo
        .create(CreateInteractionParams {
            kind: InteractionKind::Call,
            subject: Some("Discovery call".to_string()),
            body: None,
            direction: Some(Direction::Outbound),
            duration_min: Some(15),
            scheduled_at: None,
            occurred_at: None,
            contact_id: Some(contact.id),
            lead_id: None,
            company_id: None,
            author_id: sales.id,
        })
        .await?;

    assert_eq!(created.interaction.kind, InteractionKind::Call);
    assert_eq!(created.interaction.direction, Some(Direction::Outbound));
    assert_eq!(created.interaction.occurred_at, created.interaction.created_at);
    assert_eq!(created.author.map(|a| a.id), Some(sales.id));

    Ok(())
}
