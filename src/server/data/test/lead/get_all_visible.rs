use super::*;

/// Tests the unpaginated visible set used by the pipeline board.
///
/// Expected: Ok with every lead for admins and the filtered set for viewers
#[tokio::test]
async fn applies_visibility() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = factory::create_viewer(db).await?;
    let sales = factory::create_sales(db).await?;
    factory::create_lead(db).await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(sales.id)
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    assert_eq!(repo.get_all_visible(LeadVisibility::All).await?.len(), 2);
    assert_eq!(
        repo.get_all_visible(LeadVisibility::AssignedOrUnassigned(viewer.id))
            .await?
            .len(),
        1
    );

    Ok(())
}
