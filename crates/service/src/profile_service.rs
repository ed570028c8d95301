use models::{pet, pet_photo, pet_photo_tagged_pet, profile};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::pet_service;
use crate::photo_service::{self, PhotoWithPets};

#[instrument(skip(db, input))]
pub async fn create_profile(db: &DatabaseConnection, input: &profile::ProfileInput) -> Result<profile::Model, ServiceError> {
    let draft = profile::validate(input)?;
    let created = profile::create(db, draft).await?;
    info!(profile_id = created.id, "profile_created");
    Ok(created)
}

pub async fn get_profile<C: ConnectionTrait>(db: &C, id: i32) -> Result<profile::Model, ServiceError> {
    profile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("profile"))
}

#[instrument(skip(db, input))]
pub async fn update_profile(db: &DatabaseConnection, id: i32, input: &profile::ProfileInput) -> Result<profile::Model, ServiceError> {
    let existing = get_profile(db, id).await?;
    let draft = profile::validate(input)?;
    let mut am: profile::ActiveModel = existing.into();
    draft.apply(&mut am);
    let updated = am.update(db).await?;
    info!(profile_id = id, "profile_updated");
    Ok(updated)
}

/// Everything the profile details page shows.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub profile: profile::Model,
    pub full_name: String,
    pub pets: Vec<pet::Model>,
    pub photos: Vec<PhotoWithPets>,
    pub total_likes: i64,
    pub photo_count: usize,
}

pub async fn overview<C: ConnectionTrait>(db: &C, profile: profile::Model) -> Result<ProfileOverview, ServiceError> {
    let pets = pet_service::pets_for_profile(db, profile.id).await?;
    let photos = photo_service::photos_for_profile(db, profile.id).await?;
    Ok(ProfileOverview {
        full_name: profile.full_name(),
        total_likes: photo_service::total_likes(&photos),
        photo_count: photos.len(),
        profile,
        pets,
        photos,
    })
}

/// Rows removed together with a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    pub profile_id: i32,
    pub pet_ids: Vec<i32>,
    /// Every photo tagged by any of the pets, including photos that also tag
    /// other profiles' pets.
    pub photo_ids: Vec<i32>,
}

pub async fn plan_deletion<C: ConnectionTrait>(db: &C, profile_id: i32) -> Result<DeletionPlan, ServiceError> {
    let pet_ids = pet_service::pets_for_profile(db, profile_id).await?.into_iter().map(|p| p.id).collect();
    let photo_ids = photo_service::photo_ids_for_profile(db, profile_id).await?;
    Ok(DeletionPlan { profile_id, pet_ids, photo_ids })
}

/// Children first, the profile last. A profile that is already gone is
/// `NotFound`; the caller drops the transaction, which rolls everything back.
pub async fn apply_deletion(txn: &DatabaseTransaction, plan: &DeletionPlan) -> Result<(), ServiceError> {
    pet_photo_tagged_pet::Entity::delete_many()
        .filter(pet_photo_tagged_pet::Column::PhotoId.is_in(plan.photo_ids.clone()))
        .exec(txn)
        .await?;
    pet_photo_tagged_pet::Entity::delete_many()
        .filter(pet_photo_tagged_pet::Column::PetId.is_in(plan.pet_ids.clone()))
        .exec(txn)
        .await?;
    let photos = pet_photo::Entity::delete_many()
        .filter(pet_photo::Column::Id.is_in(plan.photo_ids.clone()))
        .exec(txn)
        .await?;
    let pets = pet::Entity::delete_many()
        .filter(pet::Column::ProfileId.eq(plan.profile_id))
        .exec(txn)
        .await?;
    let res = profile::Entity::delete_by_id(plan.profile_id).exec(txn).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("profile"));
    }
    debug!(photos = photos.rows_affected, pets = pets.rows_affected, "cascade applied");
    Ok(())
}

/// Delete a profile with its pets and their photos, all or nothing.
#[instrument(skip(db))]
pub async fn delete_profile(db: &DatabaseConnection, profile_id: i32) -> Result<DeletionPlan, ServiceError> {
    let txn = db.begin().await?;
    let plan = plan_deletion(&txn, profile_id).await?;
    if let Err(e) = apply_deletion(&txn, &plan).await {
        txn.rollback().await?;
        return Err(e);
    }
    txn.commit().await?;
    info!(profile_id, pets = plan.pet_ids.len(), photos = plan.photo_ids.len(), "profile_deleted");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_profile::ActiveProfileContext;
    use crate::test_support::{get_db, profile_input, seed_pet, seed_photo, seed_profile};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_and_update_profile() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_profile(&db, &profile_input("Ana")).await?;
        assert_eq!(created.full_name(), "Ana Tester");

        let mut input = profile::ProfileInput::from_model(&created);
        input.email = "ana@example.com".into();
        input.gender = "Female".into();
        let updated = update_profile(&db, created.id, &input).await?;
        assert_eq!(updated.email.as_deref(), Some("ana@example.com"));
        assert_eq!(updated.gender, Some(profile::Gender::Female));

        input.first_name = "A1".into();
        let err = update_profile(&db, created.id, &input).await.unwrap_err();
        assert!(err.field_errors().map(|e| e.has("first_name")).unwrap_or(false));
        assert_eq!(get_profile(&db, created.id).await?.first_name, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn overview_counts_each_photo_once() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let me = seed_profile(&db, "Me").await?;
        let rex = seed_pet(&db, me.id, "Rex").await?;
        let tom = seed_pet(&db, me.id, "Tom").await?;
        seed_photo(&db, &[rex.id, tom.id], 6).await?;
        seed_photo(&db, &[tom.id], 1).await?;

        let o = overview(&db, me).await?;
        assert_eq!(o.pets.len(), 2);
        assert_eq!(o.photo_count, 2);
        assert_eq!(o.total_likes, 7);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_tagged_photos_only() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let me = seed_profile(&db, "Me").await?;
        let other = seed_profile(&db, "Other").await?;
        let rex = seed_pet(&db, me.id, "Rex").await?;
        let stray = seed_pet(&db, other.id, "Stray").await?;
        let mine = seed_photo(&db, &[rex.id], 1).await?;
        let shared = seed_photo(&db, &[rex.id, stray.id], 1).await?;
        let theirs = seed_photo(&db, &[stray.id], 1).await?;

        let plan = delete_profile(&db, me.id).await?;
        assert_eq!(plan.pet_ids, vec![rex.id]);
        assert_eq!(plan.photo_ids, vec![mine.id, shared.id]);

        assert!(profile::Entity::find_by_id(me.id).one(&db).await?.is_none());
        assert!(pet::Entity::find_by_id(rex.id).one(&db).await?.is_none());
        assert!(pet_photo::Entity::find_by_id(mine.id).one(&db).await?.is_none());
        assert!(pet_photo::Entity::find_by_id(shared.id).one(&db).await?.is_none());
        let survivor = photo_service::get_photo(&db, theirs.id).await?;
        assert_eq!(survivor.tagged_pets, vec![stray]);
        assert_eq!(pet_photo_tagged_pet::Entity::find().count(&db).await?, 1);

        // the next profile becomes active
        let ctx = ActiveProfileContext::resolve(&db).await?;
        assert_eq!(ctx.profile().map(|p| p.id), Some(other.id));
        Ok(())
    }

    #[tokio::test]
    async fn vanished_profile_rolls_back_cascade() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let me = seed_profile(&db, "Me").await?;
        let rex = seed_pet(&db, me.id, "Rex").await?;
        seed_photo(&db, &[rex.id], 1).await?;
        let plan = plan_deletion(&db, me.id).await?;

        // aim the plan at a profile that no longer exists
        let ghost = DeletionPlan { profile_id: me.id + 100, ..plan };
        let txn = db.begin().await?;
        let err = apply_deletion(&txn, &ghost).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        txn.rollback().await?;

        assert_eq!(pet_photo::Entity::find().count(&db).await?, 1);
        assert_eq!(pet_photo_tagged_pet::Entity::find().count(&db).await?, 1);
        assert_eq!(pet::Entity::find().count(&db).await?, 1);
        assert!(matches!(delete_profile(&db, me.id + 100).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn profile_without_pets_deletes_cleanly() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let me = seed_profile(&db, "Me").await?;
        let plan = delete_profile(&db, me.id).await?;
        assert!(plan.pet_ids.is_empty() && plan.photo_ids.is_empty());
        assert_eq!(profile::Entity::find().count(&db).await?, 0);
        Ok(())
    }
}
