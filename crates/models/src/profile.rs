use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::pet;
use crate::validation::{self, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub date_of_birth: Option<Date>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
}

impl Model {
    pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
    #[sea_orm(string_value = "Do not show")]
    #[serde(rename = "Do not show")]
    DoNotShow,
}

impl Gender {
    pub fn parse(label: &str) -> Option<Self> { Self::iter().find(|g| g.to_value() == label) }

    pub fn labels() -> Vec<String> { Self::iter().map(|g| g.to_value()).collect() }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Pet => Entity::has_many(pet::Entity).into() }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Raw profile form. Creation posts only the three identity fields; edit
/// posts all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub date_of_birth: String,
    pub email: String,
    pub gender: String,
    pub description: String,
}

impl ProfileInput {
    /// Form prefilled from a stored profile; gender defaults to "Do not show".
    pub fn from_model(m: &Model) -> Self {
        Self {
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            profile_picture: m.profile_picture.clone(),
            date_of_birth: m.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            email: m.email.clone().unwrap_or_default(),
            gender: m.gender.unwrap_or(Gender::DoNotShow).to_value(),
            description: m.description.clone().unwrap_or_default(),
        }
    }
}

/// Validated profile values, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: String,
    pub date_of_birth: Option<Date>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
}

fn person_name(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<String> {
    let v = validation::required_text(errors, field, raw, 2, 30)?;
    validation::letters_only(errors, field, &v).then_some(v)
}

pub fn validate(input: &ProfileInput) -> Result<ProfileDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let first_name = person_name(&mut errors, "first_name", &input.first_name);
    let last_name = person_name(&mut errors, "last_name", &input.last_name);
    let profile_picture = validation::required_url(&mut errors, "profile_picture", &input.profile_picture);
    let date_of_birth = validation::birth_date(&mut errors, "date_of_birth", &input.date_of_birth, false);
    let email = validation::optional_email(&mut errors, "email", &input.email);
    let gender = match validation::optional_text(&input.gender) {
        None => None,
        Some(label) => match Gender::parse(&label) {
            Some(g) => Some(g),
            None => {
                errors.add("gender", format!("Select a valid choice. {label} is not one of the available choices."));
                None
            }
        },
    };
    let description = validation::optional_text(&input.description);
    errors.finish(|| ProfileDraft {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        profile_picture: profile_picture.unwrap_or_default(),
        date_of_birth,
        email,
        gender,
        description,
    })
}

impl ProfileDraft {
    pub fn apply(self, am: &mut ActiveModel) {
        am.first_name = Set(self.first_name);
        am.last_name = Set(self.last_name);
        am.profile_picture = Set(self.profile_picture);
        am.date_of_birth = Set(self.date_of_birth);
        am.email = Set(self.email);
        am.gender = Set(self.gender);
        am.description = Set(self.description);
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, draft: ProfileDraft) -> Result<Model, errors::ModelError> {
    let mut am = ActiveModel::new();
    draft.apply(&mut am);
    Ok(am.insert(db).await?)
}

/// First-created profile, if any.
pub async fn first<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).one(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProfileInput {
        ProfileInput {
            first_name: "Ana".into(),
            last_name: "Petrova".into(),
            profile_picture: "https://example.com/me.jpg".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_form_needs_only_identity_fields() {
        let d = validate(&input()).unwrap();
        assert_eq!(d.first_name, "Ana");
        assert_eq!(d.gender, None);
        assert_eq!(d.email, None);
    }

    #[test]
    fn names_must_be_letters_and_long_enough() {
        let mut i = input();
        i.first_name = "A".into();
        i.last_name = "P3trova".into();
        let e = validate(&i).unwrap_err();
        assert!(e.has("first_name"));
        assert_eq!(e.get("last_name"), ["Ensure this value contains only letters.".to_string()]);
    }

    #[test]
    fn gender_must_be_a_known_label() {
        let mut i = input();
        i.gender = "Do not show".into();
        assert_eq!(validate(&i).unwrap().gender, Some(Gender::DoNotShow));
        i.gender = "Robot".into();
        assert!(validate(&i).unwrap_err().has("gender"));
    }

    #[test]
    fn edit_form_defaults_gender_to_do_not_show() {
        let m = Model {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Petrova".into(),
            profile_picture: "https://example.com/me.jpg".into(),
            date_of_birth: None,
            email: None,
            gender: None,
            description: None,
        };
        assert_eq!(ProfileInput::from_model(&m).gender, "Do not show");
        assert_eq!(Gender::labels(), vec!["Male", "Female", "Do not show"]);
    }
}
