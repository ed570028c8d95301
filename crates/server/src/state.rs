use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use sea_orm::DatabaseConnection;
use tera::{Context, Tera};

use crate::errors::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub templates: Arc<Tera>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, templates: Tera) -> Self {
        Self { db, templates: Arc::new(templates) }
    }

    pub fn render(&self, name: &str, ctx: &Context) -> Result<Response, AppError> {
        let html = self.templates.render(name, ctx)?;
        Ok(Html(html).into_response())
    }
}
