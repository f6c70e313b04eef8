use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_profile_table::Profile, m20260105_000002_create_company_table::Company,
    m20260105_000003_create_contact_table::Contact,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(pk_uuid(Lead::Id))
                    .col(string_len(Lead::Title, 255))
                    .col(string_len(Lead::Status, 20).default("new"))
                    .col(double_null(Lead::Value))
                    .col(integer(Lead::Probability).default(0))
                    .col(date_null(Lead::ExpectedCloseDate))
                    .col(uuid_null(Lead::ContactId))
                    .col(uuid_null(Lead::CompanyId))
                    .col(uuid_null(Lead::AssignedTo))
                    .col(string_len_null(Lead::Source, 100))
                    .col(text_null(Lead::LostReason))
                    .col(text_null(Lead::Notes))
                    .col(uuid_null(Lead::CreatedBy))
                    .col(
                        timestamp_with_time_zone(Lead::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Lead::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lead_contact_id")
                            .from(Lead::Table, Lead::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lead_company_id")
                            .from(Lead::Table, Lead::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lead_assigned_to")
                            .from(Lead::Table, Lead::AssignedTo)
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
                    .name("idx_lead_assigned_to")
                    .table(Lead::Table)
                    .col(Lead::AssignedTo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lead_status")
                    .table(Lead::Table)
                    .col(Lead::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lead {
    Table,
    Id,
    Title,
    Status,
    Value,
    Probability,
    ExpectedCloseDate,
    ContactId,
    CompanyId,
    AssignedTo,
    Source,
    LostReason,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
