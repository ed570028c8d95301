//! Create `pet_photo` table.
//!
//! Photos hang off pets only through the tagging table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PetPhoto::Table)
                    .if_not_exists()
                    .col(pk_auto(PetPhoto::Id))
                    .col(string_len(PetPhoto::Photo, 500).not_null())
                    .col(text_null(PetPhoto::Description))
                    .col(timestamp_with_time_zone(PetPhoto::PublishedAt).not_null())
                    .col(integer(PetPhoto::Likes).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PetPhoto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PetPhoto { Table, Id, Photo, Description, PublishedAt, Likes }
