use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, pet, pet_photo};

/// Tagging row: photo `photo_id` shows pet `pet_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet_photo_tagged_pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub photo_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub pet_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Photo,
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Photo => Entity::belongs_to(pet_photo::Entity).from(Column::PhotoId).to(pet_photo::Column::Id).into(),
            Relation::Pet => Entity::belongs_to(pet::Entity).from(Column::PetId).to(pet::Column::Id).into(),
        }
    }
}

impl Related<pet_photo::Entity> for Entity {
    fn to() -> RelationDef { Relation::Photo.def() }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert one tagging row per pet id.
pub async fn tag_all<C: ConnectionTrait>(db: &C, photo_id: i32, pet_ids: &[i32]) -> Result<(), errors::ModelError> {
    if pet_ids.is_empty() {
        return Ok(());
    }
    let rows = pet_ids.iter().map(|&pet_id| ActiveModel { photo_id: Set(photo_id), pet_id: Set(pet_id) });
    Entity::insert_many(rows).exec_without_returning(db).await?;
    Ok(())
}
