use models::pet::{self, PetDraft};
use models::pet_photo_tagged_pet;
use models::validation::{FieldErrors, NON_FIELD};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;

pub const DUPLICATE_PET: &str = "Pet with this owner, name, type and date of birth already exists.";

fn duplicate() -> ServiceError { FieldErrors::single(NON_FIELD, DUPLICATE_PET).into() }

/// Unique index violations surface as the same form error as the pre-check.
fn map_insert_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(),
        _ => e.into(),
    }
}

/// No other pet of `owner_id` may share name, type and date of birth.
/// `exclude_id` is the pet being edited.
pub async fn ensure_unique_pet<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    draft: &PetDraft,
    exclude_id: Option<i32>,
) -> Result<(), ServiceError> {
    let mut q = pet::Entity::find()
        .filter(pet::Column::ProfileId.eq(owner_id))
        .filter(pet::Column::Name.eq(draft.name.as_str()))
        .filter(pet::Column::PetType.eq(draft.pet_type))
        .filter(pet::Column::DateOfBirth.eq(draft.date_of_birth));
    if let Some(id) = exclude_id {
        q = q.filter(pet::Column::Id.ne(id));
    }
    if q.count(db).await? > 0 {
        warn!(owner_id, name = %draft.name, "duplicate pet rejected");
        return Err(duplicate());
    }
    Ok(())
}

/// Field rules first, then uniqueness against the owner attached afterwards.
#[instrument(skip(db, input))]
pub async fn create_pet(db: &DatabaseConnection, owner_id: i32, input: &pet::PetInput) -> Result<pet::Model, ServiceError> {
    let draft = pet::validate(input)?;
    ensure_unique_pet(db, owner_id, &draft, None).await?;
    let created = draft.into_active_model(owner_id).insert(db).await.map_err(map_insert_err)?;
    info!(pet_id = created.id, owner_id, "pet_created");
    Ok(created)
}

/// A pet of `owner_id`; pets of other profiles are reported as missing.
pub async fn get_owned_pet<C: ConnectionTrait>(db: &C, owner_id: i32, pet_id: i32) -> Result<pet::Model, ServiceError> {
    pet::Entity::find_by_id(pet_id)
        .filter(pet::Column::ProfileId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("pet"))
}

/// Edit fields; the owner never changes.
#[instrument(skip(db, input))]
pub async fn update_pet(
    db: &DatabaseConnection,
    owner_id: i32,
    pet_id: i32,
    input: &pet::PetInput,
) -> Result<pet::Model, ServiceError> {
    let existing = get_owned_pet(db, owner_id, pet_id).await?;
    let draft = pet::validate(input)?;
    ensure_unique_pet(db, owner_id, &draft, Some(pet_id)).await?;
    let mut am: pet::ActiveModel = existing.into();
    am.name = Set(draft.name);
    am.pet_type = Set(draft.pet_type);
    am.date_of_birth = Set(draft.date_of_birth);
    let updated = am.update(db).await.map_err(map_insert_err)?;
    info!(pet_id, "pet_updated");
    Ok(updated)
}

/// Delete by identity only and return the pet as stored. Tags of the pet go
/// with it; photos stay.
#[instrument(skip(db))]
pub async fn confirm_delete_pet(db: &DatabaseConnection, owner_id: i32, pet_id: i32) -> Result<pet::Model, ServiceError> {
    let txn = db.begin().await?;
    let existing = get_owned_pet(&txn, owner_id, pet_id).await?;
    pet_photo_tagged_pet::Entity::delete_many()
        .filter(pet_photo_tagged_pet::Column::PetId.eq(pet_id))
        .exec(&txn)
        .await?;
    pet::Entity::delete_by_id(pet_id).exec(&txn).await?;
    txn.commit().await?;
    info!(pet_id, owner_id, "pet_deleted");
    Ok(existing)
}

pub async fn pets_for_profile<C: ConnectionTrait>(db: &C, owner_id: i32) -> Result<Vec<pet::Model>, ServiceError> {
    Ok(pet::Entity::find()
        .filter(pet::Column::ProfileId.eq(owner_id))
        .order_by_asc(pet::Column::Id)
        .all(db)
        .await?)
}

/// Choices for photo tagging.
pub async fn all_pets<C: ConnectionTrait>(db: &C) -> Result<Vec<pet::Model>, ServiceError> {
    Ok(pet::Entity::find().order_by_asc(pet::Column::Id).all(db).await?)
}
