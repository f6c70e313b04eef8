use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_uuid(Company::Id))
                    .col(string_len(Company::Name, 255))
                    .col(string_len_null(Company::Domain, 255))
                    .col(string_len_null(Company::Industry, 100))
                    .col(string_len_null(Company::Size, 20))
                    .col(string_null(Company::Website))
                    .col(string_null(Company::Phone))
                    .col(string_null(Company::Address))
                    .col(string_len_null(Company::City, 100))
                    .col(string_len_null(Company::Country, 100))
                    .col(string_null(Company::LogoUrl))
                    .col(double_null(Company::AnnualRevenue))
                    .col(text_null(Company::Notes))
                    .col(uuid_null(Company::CreatedBy))
                    .col(
                        timestamp_with_time_zone(Company::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Company::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_company_updated_at")
                    .table(Company::Table)
                    .col(Company::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Company {
    Table,
    Id,
    Name,
    Domain,
    Industry,
    Size,
    Website,
    Phone,
    Address,
    City,
    Country,
    LogoUrl,
    AnnualRevenue,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
