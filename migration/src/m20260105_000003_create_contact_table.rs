use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_profile_table::Profile, m20260105_000002_create_company_table::Company,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(pk_uuid(Contact::Id))
                    .col(string_len(Contact::FirstName, 100))
                    .col(string_len(Contact::LastName, 100))
                    .col(string_null(Contact::Email).unique_key())
                    .col(string_null(Contact::Phone))
                    .col(string_null(Contact::Mobile))
                    .col(string_null(Contact::JobTitle))
                    .col(string_null(Contact::Department))
                    .col(uuid_null(Contact::CompanyId))
                    .col(string_null(Contact::AvatarUrl))
                    .col(string_null(Contact::LinkedinUrl))
                    .col(string_null(Contact::Address))
                    .col(string_null(Contact::City))
                    .col(string_null(Contact::Country))
                    .col(json(Contact::Tags))
                    .col(boolean(Contact::IsSubscribed).default(false))
                    .col(text_null(Contact::Notes))
                    .col(uuid_null(Contact::AssignedTo))
                    .col(uuid_null(Contact::CreatedBy))
                    .col(
                        timestamp_with_time_zone(Contact::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Contact::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_company_id")
                            .from(Contact::Table, Contact::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_assigned_to")
                            .from(Contact::Table, Contact::AssignedTo)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contact_company_id")
                    .table(Contact::Table)
                    .col(Contact::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Contact {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Mobile,
    JobTitle,
    Department,
    CompanyId,
    AvatarUrl,
    LinkedinUrl,
    Address,
    City,
    Country,
    Tags,
    IsSubscribed,
    Notes,
    AssignedTo,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
