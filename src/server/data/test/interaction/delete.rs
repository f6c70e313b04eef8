use super::*;

/// Tests deleting an interaction.
///
/// Expected: Ok(true) then Ok(false) on a second attempt
#[tokio::test]
async fn deletes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let contact = factory::create_contact(db).await?;
    let interaction = factory::create_interaction(db, contact.id, sales.id).await?;

    let repo = InteractionRepository::new(db);
    assert!(repo.delete(interaction.id).await?);
    assert!(repo.find_by_id(interaction.id).await?.is_none());
    assert!(!repo.delete(interaction.id).await?);

    Ok(())
}
