use super::*;

/// Tests email ownership checks, including the self exclusion used on update.
///
/// Expected: taken for others, free when excluding the owner
#[tokio::test]
async fn detects_email_used_by_another_contact() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::contact::ContactFactory::new(db)
        .email("owner@example.com")
        .build()
        .await?;

    let repo = ContactRepository::new(db);
    assert!(repo.email_taken("owner@example.com", None).await?);
    assert!(!repo.email_taken("owner@example.com", Some(owner.id)).await?);
    assert!(!repo.email_taken("someone@example.com", None).await?);

    Ok(())
}
