//! Migration: Create consumers table (customer and organisation profiles).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Consumers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Consumers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Consumers::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Consumers::Type).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Consumers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Consumers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Profiles never outlive their account
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consumers_user_id")
                            .from(Consumers::Table, Consumers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Consumers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Consumers {
    Table,
    Id,
    UserId,
    Type,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
