use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::validation::{self, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_done: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Todos are listed by the web app but only ever written through here
/// (seeding, tests).
pub async fn create<C: ConnectionTrait>(db: &C, title: &str, description: &str, is_done: bool) -> Result<Model, errors::ModelError> {
    let mut e = FieldErrors::new();
    let title = validation::required_text(&mut e, "title", title, 1, 30);
    let title = e.finish(|| title.unwrap_or_default())?;
    let am = ActiveModel {
        title: Set(title),
        description: Set(description.to_string()),
        is_done: Set(is_done),
        ..ActiveModel::new()
    };
    Ok(am.insert(db).await?)
}
