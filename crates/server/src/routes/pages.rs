use axum::extract::State;
use axum::response::Response;
use service::photo_service;

use crate::errors::AppError;
use crate::extractors::ActiveProfile;
use crate::state::ServerState;
use crate::templates::page_context;

pub async fn home(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    state.render("home.html", &page_context(ctx.profile()))
}

/// Photos of the active profile's pets, each once.
pub async fn dashboard(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let photos = photo_service::photos_for_profile(&state.db, profile.id).await?;
    let mut page = page_context(Some(profile));
    page.insert("photos", &photos);
    state.render("dashboard.html", &page)
}
