use axum::extract::State;
use axum::response::Response;
use service::todo_service;

use crate::errors::AppError;
use crate::state::ServerState;
use crate::templates::page_context;

pub async fn list(State(state): State<ServerState>) -> Result<Response, AppError> {
    let todos = todo_service::list_todos(&state.db).await?;
    let mut page = page_context(None);
    page.insert("todos", &todos);
    state.render("todos.html", &page)
}
