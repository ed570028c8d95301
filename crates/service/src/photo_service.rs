use models::{pet, pet_photo, pet_photo_tagged_pet};
use models::validation::FieldErrors;
use sea_orm::sea_query::{Expr, Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;

/// A photo with every pet it is tagged with, ordered by pet id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoWithPets {
    pub photo: pet_photo::Model,
    pub tagged_pets: Vec<pet::Model>,
}

impl PhotoWithPets {
    fn new(photo: pet_photo::Model, mut tagged_pets: Vec<pet::Model>) -> Self {
        tagged_pets.sort_by_key(|p| p.id);
        Self { photo, tagged_pets }
    }
}

/// Ids of photos tagged with at least one pet owned by `profile_id`.
fn owned_photo_ids(profile_id: i32) -> SelectStatement {
    Query::select()
        .column((pet_photo_tagged_pet::Entity, pet_photo_tagged_pet::Column::PhotoId))
        .from(pet_photo_tagged_pet::Entity)
        .inner_join(
            pet::Entity,
            Expr::col((pet::Entity, pet::Column::Id)).equals((pet_photo_tagged_pet::Entity, pet_photo_tagged_pet::Column::PetId)),
        )
        .and_where(Expr::col((pet::Entity, pet::Column::ProfileId)).eq(profile_id))
        .to_owned()
}

/// Photos visible on the dashboard and profile page of `profile_id`.
///
/// A photo tagged with several of the profile's pets appears once; the
/// membership test is a subquery so no join can duplicate rows.
pub async fn photos_for_profile<C: ConnectionTrait>(db: &C, profile_id: i32) -> Result<Vec<PhotoWithPets>, ServiceError> {
    let rows = pet_photo::Entity::find()
        .filter(pet_photo::Column::Id.in_subquery(owned_photo_ids(profile_id)))
        .order_by_asc(pet_photo::Column::Id)
        .find_with_related(pet::Entity)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(photo, pets)| PhotoWithPets::new(photo, pets)).collect())
}

/// Ids only; used to plan the profile cascade.
pub async fn photo_ids_for_profile<C: ConnectionTrait>(db: &C, profile_id: i32) -> Result<Vec<i32>, ServiceError> {
    let photos = pet_photo::Entity::find()
        .filter(pet_photo::Column::Id.in_subquery(owned_photo_ids(profile_id)))
        .order_by_asc(pet_photo::Column::Id)
        .all(db)
        .await?;
    Ok(photos.into_iter().map(|p| p.id).collect())
}

/// Sum of likes over a photo set.
pub fn total_likes(photos: &[PhotoWithPets]) -> i64 {
    photos.iter().map(|p| i64::from(p.photo.likes)).sum()
}

pub async fn get_photo<C: ConnectionTrait>(db: &C, id: i32) -> Result<PhotoWithPets, ServiceError> {
    let photo = pet_photo::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet photo"))?;
    let pets = photo.find_related(pet::Entity).all(db).await?;
    Ok(PhotoWithPets::new(photo, pets))
}

/// Every tagged id must name an existing pet.
async fn ensure_pets_exist<C: ConnectionTrait>(db: &C, pet_ids: &[i32]) -> Result<(), ServiceError> {
    let found: Vec<i32> = pet::Entity::find()
        .filter(pet::Column::Id.is_in(pet_ids.to_vec()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let mut errors = FieldErrors::new();
    for id in pet_ids.iter().filter(|id| !found.contains(id)) {
        errors.add("tagged_pets", format!("Select a valid choice. {id} is not one of the available choices."));
    }
    Ok(errors.finish(|| ())?)
}

#[instrument(skip(db, input))]
pub async fn create_photo(db: &DatabaseConnection, input: &pet_photo::PhotoInput) -> Result<PhotoWithPets, ServiceError> {
    let draft = pet_photo::validate(input)?;
    ensure_pets_exist(db, &draft.tagged_pets).await?;

    let tags = draft.tagged_pets.clone();
    let txn = db.begin().await?;
    let photo = draft.into_active_model().insert(&txn).await?;
    pet_photo_tagged_pet::tag_all(&txn, photo.id, &tags).await?;
    let created = get_photo(&txn, photo.id).await?;
    txn.commit().await?;
    info!(photo_id = created.photo.id, tagged = tags.len(), "pet_photo_created");
    Ok(created)
}

/// Replace description and tags. The image and the like counter stay as stored.
#[instrument(skip(db, input))]
pub async fn update_photo(db: &DatabaseConnection, id: i32, input: &pet_photo::PhotoEditInput) -> Result<PhotoWithPets, ServiceError> {
    let draft = pet_photo::validate_edit(input)?;
    ensure_pets_exist(db, &draft.tagged_pets).await?;

    let txn = db.begin().await?;
    let existing = pet_photo::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet photo"))?;
    let mut am: pet_photo::ActiveModel = existing.into();
    am.description = Set(draft.description);
    am.update(&txn).await?;
    pet_photo_tagged_pet::Entity::delete_many()
        .filter(pet_photo_tagged_pet::Column::PhotoId.eq(id))
        .exec(&txn)
        .await?;
    pet_photo_tagged_pet::tag_all(&txn, id, &draft.tagged_pets).await?;
    let updated = get_photo(&txn, id).await?;
    txn.commit().await?;
    info!(photo_id = id, "pet_photo_updated");
    Ok(updated)
}

/// Delete a photo and its tagging rows together.
#[instrument(skip(db))]
pub async fn delete_photo(db: &DatabaseConnection, id: i32) -> Result<pet_photo::Model, ServiceError> {
    let txn = db.begin().await?;
    let existing = pet_photo::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet photo"))?;
    pet_photo_tagged_pet::Entity::delete_many()
        .filter(pet_photo_tagged_pet::Column::PhotoId.eq(id))
        .exec(&txn)
        .await?;
    pet_photo::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(photo_id = id, "pet_photo_deleted");
    Ok(existing)
}

/// Add one like and return the new count.
///
/// The increment is a single `likes = likes + 1` statement, so concurrent
/// likes on the same photo are never lost.
#[instrument(skip(db))]
pub async fn increment_likes(db: &DatabaseConnection, photo_id: i32) -> Result<i32, ServiceError> {
    let txn = db.begin().await?;
    let res = pet_photo::Entity::update_many()
        .col_expr(pet_photo::Column::Likes, Expr::col(pet_photo::Column::Likes).add(1))
        .filter(pet_photo::Column::Id.eq(photo_id))
        .exec(&txn)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("pet photo"));
    }
    let likes = pet_photo::Entity::find_by_id(photo_id)
        .one(&txn)
        .await?
        .map(|p| p.likes)
        .ok_or_else(|| ServiceError::not_found("pet photo"))?;
    txn.commit().await?;
    info!(photo_id, likes, "pet_photo_liked");
    Ok(likes)
}

pub async fn count_photos<C: ConnectionTrait>(db: &C) -> Result<u64, ServiceError> {
    Ok(pet_photo::Entity::find().count(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_pet, seed_photo, seed_profile};
    use std::sync::Arc;
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn profile_without_pets_sees_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let lonely = seed_profile(&db, "Lonely").await?;
        let other = seed_profile(&db, "Other").await?;
        let rex = seed_pet(&db, other.id, "Rex").await?;
        seed_photo(&db, &[rex.id], 7).await?;

        let photos = photos_for_profile(&db, lonely.id).await?;
        assert!(photos.is_empty());
        assert_eq!(total_likes(&photos), 0);
        Ok(())
    }

    #[tokio::test]
    async fn co_tagged_photo_counted_once() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let me = seed_profile(&db, "Me").await?;
        let other = seed_profile(&db, "Other").await?;
        let rex = seed_pet(&db, me.id, "Rex").await?;
        let tom = seed_pet(&db, me.id, "Tom").await?;
        let stranger = seed_pet(&db, other.id, "Stray").await?;

        let both = seed_photo(&db, &[rex.id, tom.id], 3).await?;
        let solo = seed_photo(&db, &[tom.id], 4).await?;
        let mixed = seed_photo(&db, &[stranger.id, rex.id], 5).await?;
        seed_photo(&db, &[stranger.id], 100).await?;

        let photos = photos_for_profile(&db, me.id).await?;
        let ids: Vec<i32> = photos.iter().map(|p| p.photo.id).collect();
        assert_eq!(ids, vec![both.id, solo.id, mixed.id]);
        assert_eq!(total_likes(&photos), 12);
        assert_eq!(photos[0].tagged_pets.iter().map(|p| p.id).collect::<Vec<_>>(), vec![rex.id, tom.id]);
        assert_eq!(photos[2].tagged_pets.len(), 2);
        assert_eq!(photo_ids_for_profile(&db, me.id).await?, ids);
        Ok(())
    }

    #[tokio::test]
    async fn like_unknown_photo_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = increment_likes(&db, 999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_likes_are_not_lost() -> Result<(), anyhow::Error> {
        let db = Arc::new(get_db().await?);
        let owner = seed_profile(&db, "Owner").await?;
        let rex = seed_pet(&db, owner.id, "Rex").await?;
        let photo = seed_photo(&db, &[rex.id], 10).await?;

        let n = 25;
        let mut set = JoinSet::new();
        for _ in 0..n {
            let db = Arc::clone(&db);
            set.spawn(async move { increment_likes(&db, photo.id).await });
        }
        while let Some(res) = set.join_next().await {
            res??;
        }
        assert_eq!(get_photo(db.as_ref(), photo.id).await?.photo.likes, 10 + n);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_existing_pets() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let input = pet_photo::PhotoInput { photo: "https://example.com/x.png".into(), description: String::new(), tagged_pets: vec![41] };
        let err = create_photo(&db, &input).await.unwrap_err();
        assert!(err.field_errors().map(|e| e.has("tagged_pets")).unwrap_or(false));
        assert_eq!(count_photos(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_edit_delete_photo() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let owner = seed_profile(&db, "Owner").await?;
        let rex = seed_pet(&db, owner.id, "Rex").await?;
        let tom = seed_pet(&db, owner.id, "Tom").await?;

        let created = create_photo(
            &db,
            &pet_photo::PhotoInput { photo: "https://example.com/x.png".into(), description: "hi".into(), tagged_pets: vec![rex.id] },
        )
        .await?;
        assert_eq!(created.photo.likes, 0);
        assert_eq!(created.tagged_pets, vec![rex.clone()]);

        increment_likes(&db, created.photo.id).await?;
        let edited = update_photo(
            &db,
            created.photo.id,
            &pet_photo::PhotoEditInput { description: "both now".into(), tagged_pets: vec![tom.id, rex.id] },
        )
        .await?;
        assert_eq!(edited.photo.likes, 1);
        assert_eq!(edited.photo.photo, "https://example.com/x.png");
        assert_eq!(edited.photo.description.as_deref(), Some("both now"));
        assert_eq!(edited.tagged_pets.len(), 2);

        delete_photo(&db, created.photo.id).await?;
        assert!(matches!(get_photo(&db, created.photo.id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(pet_photo_tagged_pet::Entity::find().count(&db).await?, 0);
        Ok(())
    }
}
