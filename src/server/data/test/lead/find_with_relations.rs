use super::*;

/// Tests loading a lead with its assignee.
///
/// Expected: Ok with the assignee row attached
#[tokio::test]
async fn attaches_assignee() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let (_, _, lead) = factory::helpers::create_lead_with_dependencies(db, Some(sales.id)).await?;

    let repo = LeadRepository::new(db);
    let found = repo.find_with_relations(lead.id).await?.unwrap();

    assert_eq!(found.assignee.map(|p| p.id), Some(sales.id));
    assert!(found.contact.is_some());
    assert!(found.company.is_some());

    Ok(())
}

/// Tests looking up an unknown lead.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_lead() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeadRepository::new(db);
    assert!(repo.find_with_relations(Uuid::new_v4()).await?.is_none());
    assert!(repo.find_by_id(Uuid::new_v4()).await?.is_none());

    Ok(())
}
