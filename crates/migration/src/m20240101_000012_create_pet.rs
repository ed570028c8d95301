//! Create `pet` table with FK to `profile`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(pk_auto(Pet::Id))
                    .col(integer(Pet::ProfileId).not_null())
                    .col(string_len(Pet::Name, 30).not_null())
                    .col(string_len(Pet::Type, 16).not_null())
                    .col(date(Pet::DateOfBirth).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_profile")
                            .from(Pet::Table, Pet::ProfileId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, Id, ProfileId, Name, Type, DateOfBirth }

#[derive(DeriveIden)]
enum Profile { Table, Id }
