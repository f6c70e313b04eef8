use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(pk_uuid(Profile::Id))
                    .col(string_null(Profile::Email))
                    .col(string(Profile::FullName))
                    .col(string_null(Profile::AvatarUrl))
                    .col(string_len(Profile::Role, 20).default("viewer"))
                    .col(string_null(Profile::Phone))
                    .col(boolean(Profile::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Profile::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Profile::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Profile {
    Table,
    Id,
    Email,
    FullName,
    AvatarUrl,
    Role,
    Phone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
