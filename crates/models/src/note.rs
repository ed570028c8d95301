use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "note")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub image_url: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteInput {
    pub title: String,
    pub image_url: String,
    pub content: String,
}

impl NoteInput {
    pub fn from_model(m: &Model) -> Self {
        Self { title: m.title.clone(), image_url: m.image_url.clone(), content: m.content.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub image_url: String,
    pub content: String,
}

pub fn validate(input: &NoteInput) -> Result<NoteDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = validation::required_text(&mut errors, "title", &input.title, 1, 30);
    let image_url = validation::required_url(&mut errors, "image_url", &input.image_url);
    let content = validation::required_text(&mut errors, "content", &input.content, 1, usize::MAX);
    errors.finish(|| NoteDraft {
        title: title.unwrap_or_default(),
        image_url: image_url.unwrap_or_default(),
        content: content.unwrap_or_default(),
    })
}

impl NoteDraft {
    pub fn apply(self, am: &mut ActiveModel) {
        am.title = Set(self.title);
        am.image_url = Set(self.image_url);
        am.content = Set(self.content);
    }
}
