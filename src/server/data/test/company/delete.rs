use super::*;
use sea_orm::EntityTrait;

/// Tests deleting a company with linked rows.
///
/// Verifies that contacts and leads survive with `company_id` cleared.
///
/// Expected: Ok(true) and dependants unlinked
#[tokio::test]
async fn deletes_company_and_unlinks_dependants() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (company, contact, lead) =
        factory::helpers::create_lead_with_dependencies(db, None).await?;

    let repo = CompanyRepository::new(db);
    assert!(repo.delete(company.id).await?);
    assert!(repo.find_by_id(company.id).await?.is_none());

    let contact = entity::prelude::Contact::find_by_id(contact.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(contact.company_id, None);

    let lead = entity::prelude::Lead::find_by_id(lead.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(lead.company_id, None);

    Ok(())
}

/// Tests deleting an unknown company.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_company() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CompanyRepository::new(db);
    assert!(!repo.delete(Uuid::new_v4()).await?);

    Ok(())
}
