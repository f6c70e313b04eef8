use super::*;

/// Tests creating a company with a size bracket.
///
/// Verifies that the creator is recorded and the size round-trips through its
/// stored string form.
///
/// Expected: Ok with all fields persisted
#[tokio::test]
async fn creates_company() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let sales = factory::create_sales(db).await?;

    let repo = CompanyRepository::new(db);
    let company = repo
        .create(CreateCompanyParams {
            name: "Acme".to_string(),
            domain: Some("acme.io".to_string()),
            industry: Some("Software".to_string()),
            size: Some(CompanySize::Small),
            website: None,
            phone: None,
            address: None,
            city: Some("Lyon".to_string()),
            country: None,
            logo_url: None,
            annual_revenue: Some(1_200_000.0),
            notes: None,
            created_by: sales.id,
        })
        .await?;

    assert_eq!(company.name, "Acme");
    assert_eq!(company.size, Some(CompanySize::Small));
    assert_eq!(company.created_by, Some(sales.id));

    let found = repo.find_by_id(company.id).await?.unwrap();
    assert_eq!(found, company);

    Ok(())
}
