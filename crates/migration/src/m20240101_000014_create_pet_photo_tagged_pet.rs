//! Create `pet_photo_tagged_pet` join table (photo many-to-many pet).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PetPhotoTaggedPet::Table)
                    .if_not_exists()
                    .col(integer(PetPhotoTaggedPet::PhotoId).not_null())
                    .col(integer(PetPhotoTaggedPet::PetId).not_null())
                    .primary_key(
                        Index::create()
                            .col(PetPhotoTaggedPet::PhotoId)
                            .col(PetPhotoTaggedPet::PetId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_photo")
                            .from(PetPhotoTaggedPet::Table, PetPhotoTaggedPet::PhotoId)
                            .to(PetPhoto::Table, PetPhoto::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_pet")
                            .from(PetPhotoTaggedPet::Table, PetPhotoTaggedPet::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PetPhotoTaggedPet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PetPhotoTaggedPet { Table, PhotoId, PetId }

#[derive(DeriveIden)]
enum PetPhoto { Table, Id }

#[derive(DeriveIden)]
enum Pet { Table, Id }
