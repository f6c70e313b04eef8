use super::*;
use sea_orm::SqlErr;

/// Tests creating a contact with tags.
///
/// Expected: Ok with tags and subscription persisted
#[tokio::test]
async fn creates_contact_with_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = ContactRepository::new(db);
    let contact = repo.create(create_params(sales.id)).await?;

    assert_eq!(contact.first_name, "Marie");
    assert_eq!(contact.tags, vec!["vip".to_string(), "lab".to_string()]);
    assert!(contact.is_subscribed);
    assert_eq!(contact.created_by, Some(sales.id));

    Ok(())
}

/// Tests the database-level email uniqueness.
///
/// Expected: Err with a unique constraint violation on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = ContactRepository::new(db);
    repo.create(create_params(sales.id)).await?;
    let result = repo.create(create_params(sales.id)).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Tests that contacts without email do not collide.
///
/// Expected: Ok for two contacts with no email
#[tokio::test]
async fn allows_multiple_contacts_without_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = ContactRepository::new(db);
    for _ in 0..2 {
        repo.create(CreateContactParams {
            email: None,
            ..create_params(sales.id)
        })
        .await?;
    }

    assert_eq!(repo.count().await?, 2);

    Ok(())
}
