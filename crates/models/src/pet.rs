use sea_orm::{entity::prelude::*, Set};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

use crate::{pet_photo, pet_photo_tagged_pet, profile};
use crate::validation::{self, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub date_of_birth: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PetType {
    #[sea_orm(string_value = "Cat")]
    Cat,
    #[sea_orm(string_value = "Dog")]
    Dog,
    #[sea_orm(string_value = "Bunny")]
    Bunny,
    #[sea_orm(string_value = "Parrot")]
    Parrot,
    #[sea_orm(string_value = "Fish")]
    Fish,
    #[sea_orm(string_value = "Other")]
    Other,
}

impl PetType {
    pub fn parse(label: &str) -> Option<Self> { Self::iter().find(|t| t.to_value() == label) }

    pub fn labels() -> Vec<String> { Self::iter().map(|t| t.to_value()).collect() }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Profile,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Profile => Entity::belongs_to(profile::Entity)
                .from(Column::ProfileId)
                .to(profile::Column::Id)
                .into(),
            Relation::Tag => Entity::has_many(pet_photo_tagged_pet::Entity).into(),
        }
    }
}

impl Related<profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::Profile.def() }
}

impl Related<pet_photo_tagged_pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl Related<pet_photo::Entity> for Entity {
    fn to() -> RelationDef { pet_photo_tagged_pet::Relation::Photo.def() }
    fn via() -> Option<RelationDef> { Some(pet_photo_tagged_pet::Relation::Pet.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PetInput {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub date_of_birth: String,
}

impl PetInput {
    pub fn from_model(m: &Model) -> Self {
        Self { name: m.name.clone(), pet_type: m.pet_type.to_value(), date_of_birth: m.date_of_birth.to_string() }
    }
}

/// Validated pet fields. The owner is deliberately absent: on creation it is
/// attached after validation, so field rules must not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    pub name: String,
    pub pet_type: PetType,
    pub date_of_birth: Date,
}

pub fn validate(input: &PetInput) -> Result<PetDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = validation::required_text(&mut errors, "name", &input.name, 1, 30);
    let pet_type = match validation::optional_text(&input.pet_type) {
        None => {
            errors.add("type", validation::REQUIRED);
            None
        }
        Some(label) => {
            let parsed = PetType::parse(&label);
            if parsed.is_none() {
                errors.add("type", format!("Select a valid choice. {label} is not one of the available choices."));
            }
            parsed
        }
    };
    let date_of_birth = validation::birth_date(&mut errors, "date_of_birth", &input.date_of_birth, true);
    match (name, pet_type, date_of_birth) {
        (Some(name), Some(pet_type), Some(date_of_birth)) if errors.is_empty() => {
            Ok(PetDraft { name, pet_type, date_of_birth })
        }
        _ => Err(errors),
    }
}

impl PetDraft {
    pub fn into_active_model(self, profile_id: i32) -> ActiveModel {
        ActiveModel {
            profile_id: Set(profile_id),
            name: Set(self.name),
            pet_type: Set(self.pet_type),
            date_of_birth: Set(self.date_of_birth),
            ..ActiveModel::new()
        }
    }
}
