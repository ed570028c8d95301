use models::note;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tracing::{info, instrument};

use crate::errors::ServiceError;

pub async fn list_notes<C: ConnectionTrait>(db: &C) -> Result<Vec<note::Model>, ServiceError> {
    Ok(note::Entity::find().order_by_asc(note::Column::Id).all(db).await?)
}

pub async fn get_note<C: ConnectionTrait>(db: &C, id: i32) -> Result<note::Model, ServiceError> {
    note::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("note"))
}

pub async fn count_notes<C: ConnectionTrait>(db: &C) -> Result<u64, ServiceError> {
    Ok(note::Entity::find().count(db).await?)
}

#[instrument(skip(db, input))]
pub async fn create_note(db: &DatabaseConnection, input: &note::NoteInput) -> Result<note::Model, ServiceError> {
    let draft = note::validate(input)?;
    let mut am = note::ActiveModel::new();
    draft.apply(&mut am);
    let created = am.insert(db).await?;
    info!(note_id = created.id, "note_created");
    Ok(created)
}

#[instrument(skip(db, input))]
pub async fn update_note(db: &DatabaseConnection, id: i32, input: &note::NoteInput) -> Result<note::Model, ServiceError> {
    let existing = get_note(db, id).await?;
    let draft = note::validate(input)?;
    let mut am: note::ActiveModel = existing.into();
    draft.apply(&mut am);
    let updated = am.update(db).await?;
    info!(note_id = id, "note_updated");
    Ok(updated)
}

/// Delete by id and return the note exactly as stored.
#[instrument(skip(db))]
pub async fn confirm_delete_note(db: &DatabaseConnection, id: i32) -> Result<note::Model, ServiceError> {
    let existing = get_note(db, id).await?;
    let res = note::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("note"));
    }
    info!(note_id = id, "note_deleted");
    Ok(existing)
}
