use super::*;

/// Tests loading a contact with company and assignee.
///
/// Expected: Ok with both relations attached
#[tokio::test]
async fn attaches_company_and_assignee() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let company = factory::create_company(db).await?;
    let contact = factory::contact::ContactFactory::new(db)
        .company_id(company.id)
        .assigned_to(sales.id)
        .build()
        .await?;

    let repo = ContactRepository::new(db);
    let found = repo.find_with_relations(contact.id).await?.unwrap();

    assert_eq!(found.contact.id, contact.id);
    assert_eq!(found.company.map(|c| c.id), Some(company.id));
    assert_eq!(found.assignee.map(|p| p.id), Some(sales.id));

    Ok(())
}

/// Tests looking up an unknown contact.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_contact() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ContactRepository::new(db);
    assert!(repo.find_with_relations(Uuid::new_v4()).await?.is_none());

    Ok(())
}
