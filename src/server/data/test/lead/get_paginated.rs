use super::*;

/// Tests row-level visibility for non-admins.
///
/// Verifies that a sales user sees leads assigned to them and unassigned leads
/// but not leads assigned to a colleague.
///
/// Expected: Ok with 2 of 3 leads
#[tokio::test]
async fn non_admin_sees_own_and_unassigned() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_sales(db).await?;
    let colleague = factory::create_sales(db).await?;
    let mine = factory::lead::LeadFactory::new(db)
        .assigned_to(me.id)
        .build()
        .await?;
    let unassigned = factory::create_lead(db).await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(colleague.id)
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let result = repo
        .get_paginated(
            LeadVisibility::AssignedOrUnassigned(me.id),
            &LeadFilter::default(),
            page(1, 20),
        )
        .await?;

    let ids: Vec<Uuid> = result.items.iter().map(|l| l.lead.id).collect();
    assert_eq!(result.total, 2);
    assert!(ids.contains(&mine.id));
    assert!(ids.contains(&unassigned.id));

    Ok(())
}

/// Tests that the assignee filter is ignored for non-admins.
///
/// Expected: Ok with the non-admin's visible set unchanged
#[tokio::test]
async fn assigned_to_filter_only_applies_to_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let me = factory::create_sales(db).await?;
    let colleague = factory::create_sales(db).await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(me.id)
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .assigned_to(colleague.id)
        .build()
        .await?;

    let filter = LeadFilter {
        assigned_to: Some(colleague.id),
        ..Default::default()
    };

    let repo = LeadRepository::new(db);
    let as_sales = repo
        .get_paginated(
            LeadVisibility::AssignedOrUnassigned(me.id),
            &filter,
            page(1, 20),
        )
        .await?;
    assert_eq!(as_sales.total, 1);
    assert_eq!(as_sales.items[0].lead.assigned_to, Some(me.id));

    let as_admin = repo
        .get_paginated(LeadVisibility::All, &filter, page(1, 20))
        .await?;
    assert_eq!(as_admin.total, 1);
    assert_eq!(as_admin.items[0].lead.assigned_to, Some(colleague.id));

    Ok(())
}

/// Tests status and title filters with attached summaries.
///
/// Expected: Ok with the single matching lead and its contact and company rows
#[tokio::test]
async fn filters_by_status_and_title() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (company, contact, _) = factory::helpers::create_lead_with_dependencies(db, None).await?;
    let target = factory::lead::LeadFactory::new(db)
        .title("ERP Migration")
        .status("proposal")
        .contact_id(contact.id)
        .company_id(company.id)
        .build()
        .await?;
    factory::lead::LeadFactory::new(db)
        .title("ERP Support")
        .status("new")
        .build()
        .await?;

    let repo = LeadRepository::new(db);
    let result = repo
        .get_paginated(
            LeadVisibility::All,
            &LeadFilter {
                search: Some("erp".to_string()),
                status: Some(LeadStatus::Proposal),
                ..Default::default()
            },
            page(1, 20),
        )
        .await?;

    assert_eq!(result.total, 1);
    let row = &result.items[0];
    assert_eq!(row.lead.id, target.id);
    assert_eq!(row.contact.as_ref().map(|c| c.id), Some(contact.id));
    assert_eq!(row.company.as_ref().map(|c| c.id), Some(company.id));

    Ok(())
}
