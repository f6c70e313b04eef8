use super::*;

/// Tests that each row carries its contact count.
///
/// Expected: Ok with 2 contacts counted for one company and 0 for the other
#[tokio::test]
async fn counts_contacts_per_company() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let with_contacts = factory::create_company(db).await?;
    let empty = factory::create_company(db).await?;
    for _ in 0..2 {
        factory::contact::ContactFactory::new(db)
            .company_id(with_contacts.id)
            .build()
            .await?;
    }

    let repo = CompanyRepository::new(db);
    let result = repo
        .get_paginated(&CompanyFilter::default(), page(1, 20))
        .await?;

    assert_eq!(result.total, 2);
    let count_for = |id: Uuid| {
        result
            .items
            .iter()
            .find(|c| c.company.id == id)
            .map(|c| c.contacts_count)
    };
    assert_eq!(count_for(with_contacts.id), Some(2));
    assert_eq!(count_for(empty.id), Some(0));

    Ok(())
}

/// Tests the search filter over name and domain.
///
/// Verifies that matching is case-insensitive and covers the domain column.
///
/// Expected: Ok with only the matching companies
#[tokio::test]
async fn searches_name_and_domain_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::company::CompanyFactory::new(db)
        .name("Globex Corporation")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .name("Initech")
        .domain("globex-partner.com")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .name("Umbrella")
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let result = repo
        .get_paginated(
            &CompanyFilter {
                search: Some("GLOBEX".to_string()),
                ..Default::default()
            },
            page(1, 20),
        )
        .await?;

    assert_eq!(result.total, 2);
    assert!(result.items.iter().all(|c| c.company.name != "Umbrella"));

    Ok(())
}

/// Tests industry and city substring filters.
///
/// Expected: Ok with the single company matching both filters
#[tokio::test]
async fn filters_by_industry_and_city() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let target = factory::company::CompanyFactory::new(db)
        .industry("Software")
        .city("Paris")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .industry("Software")
        .city("Lyon")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .industry("Retail")
        .city("Paris")
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let result = repo
        .get_paginated(
            &CompanyFilter {
                industry: Some("soft".to_string()),
                city: Some("par".to_string()),
                ..Default::default()
            },
            page(1, 20),
        )
        .await?;

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].company.id, target.id);

    Ok(())
}

/// Tests ordering and page slicing.
///
/// Verifies that rows come most recently updated first and that the total
/// reflects every matching row, not just the page.
///
/// Expected: Ok with newest company on page 1 and total 3
#[tokio::test]
async fn orders_by_updated_at_desc_and_paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let oldest = factory::company::CompanyFactory::new(db)
        .timestamps(now - Duration::days(3))
        .build()
        .await?;
    let newest = factory::company::CompanyFactory::new(db)
        .timestamps(now)
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .timestamps(now - Duration::days(1))
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let first = repo
        .get_paginated(&CompanyFilter::default(), page(1, 2))
        .await?;
    let last = repo
        .get_paginated(&CompanyFilter::default(), page(2, 2))
        .await?;

    assert_eq!(first.total, 3);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].company.id, newest.id);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].company.id, oldest.id);

    let pagination = first.pagination();
    assert_eq!(pagination.total_pages, 2);

    Ok(())
}

/// Tests searching with accented letters in a different case.
///
/// Expected: Ok with the company named "École Nord" for both "École" and "école"
#[tokio::test]
async fn search_folds_case_of_accented_letters() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let ecole = factory::company::CompanyFactory::new(db)
        .name("École Nord")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .name("Ecole Sud")
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    for term in ["École", "école", "ÉCOLE"] {
        let result = repo
            .get_paginated(
                &CompanyFilter {
                    search: Some(term.to_string()),
                    ..Default::default()
                },
                page(1, 20),
            )
            .await?;

        assert_eq!(result.total, 1, "search term {term}");
        assert_eq!(result.items[0].company.id, ecole.id);
    }

    Ok(())
}

/// Tests that `%` and `_` in a search term are matched literally.
///
/// Expected: Ok with only the company whose name contains "50%", and no match for "_"
#[tokio::test]
async fn search_matches_wildcard_characters_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_crm_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let discount = factory::company::CompanyFactory::new(db)
        .name("Remise 50% SARL")
        .build()
        .await?;
    factory::company::CompanyFactory::new(db)
        .name("Studio 500")
        .build()
        .await?;

    let repo = CompanyRepository::new(db);
    let percent = repo
        .get_paginated(
            &CompanyFilter {
                search: Some("50%".to_string()),
                ..Default::default()
            },
            page(1, 20),
        )
        .await?;
    let underscore = repo
        .get_paginated(
            &CompanyFilter {
                search: Some("_".to_string()),
                ..Default::default()
            },
            page(1, 20),
        )
        .await?;

    assert_eq!(percent.total, 1);
    assert_eq!(percent.items[0].company.id, discount.id);
    assert_eq!(underscore.total, 0);

    Ok(())
}
