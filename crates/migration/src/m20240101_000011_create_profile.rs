//! Create `profile` table.
//!
//! Root entity; pets reference it. The lowest id is the active profile.
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
                    .col(pk_auto(Profile::Id))
                    .col(string_len(Profile::FirstName, 30).not_null())
                    .col(string_len(Profile::LastName, 30).not_null())
                    .col(string_len(Profile::ProfilePicture, 500).not_null())
                    .col(date_null(Profile::DateOfBirth))
                    .col(string_len_null(Profile::Email, 254))
                    .col(string_len_null(Profile::Gender, 16))
                    .col(text_null(Profile::Description))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Profile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Profile { Table, Id, FirstName, LastName, ProfilePicture, DateOfBirth, Email, Gender, Description }
