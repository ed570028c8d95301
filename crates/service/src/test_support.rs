#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::{pet, pet_photo, pet_photo_tagged_pet, profile};
use sea_orm::prelude::Date;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, Set};

/// Fresh in-memory SQLite database with every migration applied. Each call is
/// an isolated database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn profile_input(first_name: &str) -> profile::ProfileInput {
    profile::ProfileInput {
        first_name: first_name.into(),
        last_name: "Tester".into(),
        profile_picture: "https://example.com/avatar.png".into(),
        ..Default::default()
    }
}

pub fn pet_input(name: &str, kind: &str, dob: &str) -> pet::PetInput {
    pet::PetInput { name: name.into(), pet_type: kind.into(), date_of_birth: dob.into() }
}

pub async fn seed_profile(db: &DatabaseConnection, first_name: &str) -> Result<profile::Model, anyhow::Error> {
    let draft = profile::validate(&profile_input(first_name)).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(profile::create(db, draft).await?)
}

pub async fn seed_pet(db: &DatabaseConnection, owner_id: i32, name: &str) -> Result<pet::Model, anyhow::Error> {
    let am = pet::ActiveModel {
        profile_id: Set(owner_id),
        name: Set(name.to_string()),
        pet_type: Set(pet::PetType::Dog),
        date_of_birth: Set(Date::from_ymd_opt(2020, 5, 17).expect("valid date")),
        ..pet::ActiveModel::new()
    };
    Ok(am.insert(db).await?)
}

/// Photo tagged with `pet_ids`, starting at `likes`.
pub async fn seed_photo(db: &DatabaseConnection, pet_ids: &[i32], likes: i32) -> Result<pet_photo::Model, anyhow::Error> {
    let mut am = pet_photo::PhotoDraft { photo: "https://example.com/photo.png".into(), description: None, tagged_pets: pet_ids.to_vec() }
        .into_active_model();
    am.likes = Set(likes);
    let photo = am.insert(db).await?;
    pet_photo_tagged_pet::tag_all(db, photo.id, pet_ids).await?;
    Ok(photo)
}

