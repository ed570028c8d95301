use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::Form;
use models::profile::ProfileInput;
use service::errors::ServiceError;
use service::profile_service;
use tracing::info;

use crate::errors::AppError;
use crate::extractors::ActiveProfile;
use crate::forms;
use crate::observability::PROFILE_DELETIONS_TOTAL;
use crate::routes::{see_other, FormPage};
use crate::state::ServerState;
use crate::templates::page_context;

fn create_page_meta() -> FormPage<'static> { FormPage::new("Create Profile", "/profile/create/", "Create") }

fn edit_page_meta() -> FormPage<'static> { FormPage::new("Edit Profile", "/profile/edit/", "Save") }

pub async fn create_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    create_page_meta().render(&state, ctx.profile(), &forms::profile_create_form(&ProfileInput::default(), None))
}

pub async fn create(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Form(input): Form<ProfileInput>,
) -> Result<Response, AppError> {
    match profile_service::create_profile(&state.db, &input).await {
        Ok(_) => Ok(see_other("/")),
        Err(ServiceError::Validation(errors)) => {
            create_page_meta().render_invalid(&state, ctx.profile(), &forms::profile_create_form(&input, Some(&errors)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Pets, photos of those pets and the like total.
pub async fn details(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?.clone();
    let overview = profile_service::overview(&state.db, profile).await?;
    let mut page = page_context(Some(&overview.profile));
    page.insert("overview", &overview);
    state.render("profile_details.html", &page)
}

pub async fn edit_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    edit_page_meta().render(&state, Some(profile), &forms::profile_form(&ProfileInput::from_model(profile), None, false))
}

pub async fn edit(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Form(input): Form<ProfileInput>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    match profile_service::update_profile(&state.db, profile.id, &input).await {
        Ok(_) => Ok(see_other("/profile/")),
        Err(ServiceError::Validation(errors)) => {
            edit_page_meta().render_invalid(&state, Some(profile), &forms::profile_form(&input, Some(&errors), false))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    FormPage::new("Delete Profile", "/profile/delete/", "Delete")
        .danger()
        .render(&state, Some(profile), &forms::profile_form(&ProfileInput::from_model(profile), None, true))
}

/// Takes no form body: the active profile is deleted as stored.
pub async fn delete(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let plan = profile_service::delete_profile(&state.db, profile.id).await?;
    PROFILE_DELETIONS_TOTAL.inc();
    info!(profile_id = plan.profile_id, photos = plan.photo_ids.len(), "profile removed via web");
    Ok(see_other("/"))
}
