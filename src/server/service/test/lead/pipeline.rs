use super::*;

/// Tests the pipeline view for a sales user.
///
/// Leads assigned to other users are left out; every stage is present even when
/// empty.
///
/// Expected: Ok with seven columns and only visible leads
#[tokio::test]
async fn groups_visible_leads_by_stage() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;
    let other = factory::create_sales(db).await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(sales.id)
        .status("proposal")
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .status("proposal")
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(other.id)
        .status("proposal")
        .build()
        .await?;
    let caller = Profile::from_entity(sales)?;

    let columns = LeadService::new(db).pipeline(&caller).await?;

    assert_eq!(columns.len(), 7);
    let proposal = columns
        .iter()
        .find(|c| c.status == LeadStatus::Proposal)
        .unwrap();
    assert_eq!(proposal.leads.len(), 2);
    assert!(columns
        .iter()
        .filter(|c| c.status != LeadStatus::Proposal)
        .all(|c| c.leads.is_empty()));

    Ok(())
}
