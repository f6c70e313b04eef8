use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_profile_table::Profile, m20260105_000002_create_company_table::Company,
    m20260105_000003_create_contact_table::Contact, m20260105_000004_create_lead_table::Lead,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interaction::Table)
                    .if_not_exists()
                    .col(pk_uuid(Interaction::Id))
                    .col(string_len(Interaction::Kind, 20))
                    .col(string_null(Interaction::Subject))
                    .col(text_null(Interaction::Body))
                    .col(string_len_null(Interaction::Direction, 20))
                    .col(integer_null(Interaction::DurationMin))
                    .col(timestamp_with_time_zone_null(Interaction::ScheduledAt))
                    .col(timestamp_with_time_zone(Interaction::OccurredAt))
                    .col(uuid_null(Interaction::ContactId))
                    .col(uuid_null(Interaction::LeadId))
                    .col(uuid_null(Interaction::CompanyId))
                    .col(uuid_null(Interaction::AuthorId))
                    .col(
                        timestamp_with_time_zone(Interaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interaction_contact_id")
                            .from(Interaction::Table, Interaction::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interaction_lead_id")
                            .from(Interaction::Table, Interaction::LeadId)
                            .to(Lead::Table, Lead::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interaction_company_id")
                            .from(Interaction::Table, Interaction::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interaction_author_id")
                            .from(Interaction::Table, Interaction::AuthorId)
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
                    .name("idx_interaction_contact_occurred")
                    .table(Interaction::Table)
                    .col(Interaction::ContactId)
                    .col(Interaction::OccurredAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Interaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Interaction {
    Table,
    Id,
    Kind,
    Subject,
    Body,
    Direction,
    DurationMin,
    ScheduledAt,
    OccurredAt,
    ContactId,
    LeadId,
    CompanyId,
    AuthorId,
    CreatedAt,
}
