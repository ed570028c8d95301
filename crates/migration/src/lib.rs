//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000011_create_profile;
mod m20240101_000012_create_pet;
mod m20240101_000013_create_pet_photo;
mod m20240101_000014_create_pet_photo_tagged_pet;
mod m20240101_000015_create_note;
mod m20240101_000016_create_todo;
mod m20240101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000011_create_profile::Migration),
            Box::new(m20240101_000012_create_pet::Migration),
            Box::new(m20240101_000013_create_pet_photo::Migration),
            Box::new(m20240101_000014_create_pet_photo_tagged_pet::Migration),
            Box::new(m20240101_000015_create_note::Migration),
            Box::new(m20240101_000016_create_todo::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_indexes::Migration),
        ]
    }
}
