use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::{pet, pet_photo_tagged_pet};
use crate::validation::{self, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet_photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub photo: String,
    pub description: Option<String>,
    pub published_at: DateTimeWithTimeZone,
    pub likes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Tag => Entity::has_many(pet_photo_tagged_pet::Entity).into() }
    }
}

impl Related<pet_photo_tagged_pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { pet_photo_tagged_pet::Relation::Pet.def() }
    fn via() -> Option<RelationDef> { Some(pet_photo_tagged_pet::Relation::Photo.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Photo create form. `tagged_pets` arrives as repeated form keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoInput {
    pub photo: String,
    pub description: String,
    pub tagged_pets: Vec<i32>,
}

/// Photo edit form: the image and the like counter are not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoEditInput {
    pub description: String,
    pub tagged_pets: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDraft {
    pub photo: String,
    pub description: Option<String>,
    pub tagged_pets: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEditDraft {
    pub description: Option<String>,
    pub tagged_pets: Vec<i32>,
}

/// Sorted, de-duplicated, non-empty list of pet ids.
fn tagged_pets(errors: &mut FieldErrors, ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        errors.add("tagged_pets", validation::REQUIRED);
    }
    ids
}

pub fn validate(input: &PhotoInput) -> Result<PhotoDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let photo = validation::required_url(&mut errors, "photo", &input.photo);
    let description = validation::optional_text(&input.description);
    let tagged_pets = tagged_pets(&mut errors, &input.tagged_pets);
    errors.finish(|| PhotoDraft { photo: photo.unwrap_or_default(), description, tagged_pets })
}

pub fn validate_edit(input: &PhotoEditInput) -> Result<PhotoEditDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let description = validation::optional_text(&input.description);
    let tagged_pets = tagged_pets(&mut errors, &input.tagged_pets);
    errors.finish(|| PhotoEditDraft { description, tagged_pets })
}

impl PhotoDraft {
    /// New photos start with zero likes.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            photo: Set(self.photo),
            description: Set(self.description),
            published_at: Set(Utc::now().into()),
            likes: Set(0),
            ..ActiveModel::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_needs_url_and_a_tag() {
        let e = validate(&PhotoInput::default()).unwrap_err();
        assert!(e.has("photo"));
        assert!(e.has("tagged_pets"));
    }

    #[test]
    fn duplicate_tags_collapse() {
        let d = validate(&PhotoInput { photo: "https://x.io/p.png".into(), description: " ".into(), tagged_pets: vec![3, 1, 3] }).unwrap();
        assert_eq!(d.tagged_pets, vec![1, 3]);
        assert_eq!(d.description, None);
        let am = d.into_active_model();
        assert_eq!(am.likes, Set(0));
    }

    #[test]
    fn edit_requires_tags_only() {
        assert!(validate_edit(&PhotoEditInput { description: String::new(), tagged_pets: vec![2] }).is_ok());
        assert!(validate_edit(&PhotoEditInput::default()).unwrap_err().has("tagged_pets"));
    }
}
