use super::*;
use sea_orm::EntityTrait;

/// Tests deleting a contact with a lead and interactions.
///
/// Verifies that interactions on the contact are removed while its lead is kept
/// with `contact_id` cleared.
///
/// Expected: Ok(true), interaction gone, lead unlinked
#[tokio::test]
async fn removes_interactions_and_unlinks_leads() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let (_, contact, lead) = factory::helpers::create_lead_with_dependencies(db, None).await?;
    let interaction = factory::create_interaction(db, contact.id, sales.id).await?;

    let repo = ContactRepository::new(db);
    assert!(repo.delete(contact.id).await?);

    let interaction = entity::prelude::Interaction::find_by_id(interaction.id)
        .one(db)
        .await?;
    assert!(interaction.is_none());

    let lead = entity::prelude::Lead::find_by_id(lead.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(lead.contact_id, None);

    Ok(())
}
