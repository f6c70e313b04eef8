use super::*;

/// Tests that a sales user can open an unassigned lead.
///
/// Expected: Ok with the lead and its relations
#[tokio::test]
async fn sales_sees_unassigned_lead() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let caller = Profile::from_entity(factory::create_sales(db).await?)?;
    let (company, contact, lead) =
        factory::helpers::create_lead_with_dependencies(db, None).await?;

    let result = LeadService::new(db).get(&caller, lead.id).await?;

    assert_eq!(result.lead.id, lead.id);
    assert_eq!(result.company.map(|c| c.id), Some(company.id));
    assert_eq!(result.contact.map(|c| c.id), Some(contact.id));

    Ok(())
}

/// Tests that a lead assigned to another user is refused to a sales user.
///
/// The lead exists, so the response is a 403 rather than a 404.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn sales_cannot_open_other_users_lead() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let caller = Profile::from_entity(factory::create_sales(db).await?)?;
    let other = factory::create_sales(db).await?;
    let lead = factory::lead::LeadFactory::new(db)
        .assigned_to(other.id)
        .build()
        .await?;

    let result = LeadService::new(db).get(&caller, lead.id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests that admins see every lead.
///
/// Expected: Ok for a lead assigned to someone else
#[tokio::test]
async fn admin_sees_every_lead() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;
    let other = factory::create_sales(db).await?;
    let lead = factory::lead::LeadFactory::new(db)
        .assigned_to(other.id)
        .build()
        .await?;

    let result = LeadService::new(db).get(&admin, lead.id).await?;

    assert_eq!(result.lead.assigned_to, Some(other.id));

    Ok(())
}

/// Tests an unknown lead id.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn unknown_lead_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = Profile::from_entity(factory::create_admin(db).await?)?;

    let result = LeadService::new(db).get(&admin, Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
