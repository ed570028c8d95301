use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pet: composite unique (profile_id, name, type, date_of_birth)
        manager
            .create_index(
                Index::create()
                    .name("uniq_pet_profile_name_type_dob")
                    .table(Pet::Table)
                    .col(Pet::ProfileId)
                    .col(Pet::Name)
                    .col(Pet::Type)
                    .col(Pet::DateOfBirth)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Tagging: reverse lookup pet -> photos
        manager
            .create_index(
                Index::create()
                    .name("idx_tag_pet")
                    .table(PetPhotoTaggedPet::Table)
                    .col(PetPhotoTaggedPet::PetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_pet_profile_name_type_dob").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_tag_pet").table(PetPhotoTaggedPet::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, ProfileId, Name, Type, DateOfBirth }

#[derive(DeriveIden)]
enum PetPhotoTaggedPet { Table, PetId }
