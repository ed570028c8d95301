//! Create `note` table. Notes are free-standing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Note::Table)
                    .if_not_exists()
                    .col(pk_auto(Note::Id))
                    .col(string_len(Note::Title, 30).not_null())
                    .col(string_len(Note::ImageUrl, 500).not_null())
                    .col(text(Note::Content).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Note::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Note { Table, Id, Title, ImageUrl, Content }
