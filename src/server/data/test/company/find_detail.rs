use super::*;

/// Tests loading a company with its contacts.
///
/// Expected: Ok with the company's contacts only
#[tokio::test]
async fn includes_linked_contacts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;
    let linked = factory::contact::ContactFactory::new(db)
        .company_id(company.id)
        .build()
        .await?;
    factory::create_contact(db).await?;

    let repo = CompanyRepository::new(db);
    let detail = repo.find_detail(company.id).await?.unwrap();

    assert_eq!(detail.company.id, company.id);
    assert_eq!(detail.contacts.len(), 1);
    assert_eq!(detail.contacts[0].id, linked.id);

    Ok(())
}

/// Tests that at most 50 contacts are embedded.
///
/// Expected: Ok with 50 contacts out of 55
#[tokio::test]
async fn caps_embedded_contacts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let company = factory::create_company(db).await?;
    for _ in 0..55 {
        factory::contact::ContactFactory::new(db)
            .company_id(company.id)
            .build()
            .await?;
    }

    let repo = CompanyRepository::new(db);
    let detail = repo.find_detail(company.id).await?.unwrap();

    assert_eq!(detail.contacts.len(), 50);

    Ok(())
}

/// Tests looking up an unknown company.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_company() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CompanyRepository::new(db);
    assert!(repo.find_detail(Uuid::new_v4()).await?.is_none());

    Ok(())
}
