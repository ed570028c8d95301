use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Form;
use models::pet::PetInput;
use service::errors::ServiceError;
use service::pet_service;

use crate::errors::AppError;
use crate::extractors::ActiveProfile;
use crate::forms;
use crate::routes::{see_other, FormPage};
use crate::state::ServerState;

fn add_meta() -> FormPage<'static> { FormPage::new("Add Pet", "/pet/add/", "Add Pet") }

fn edit_meta(id: i32) -> FormPage<'static> { FormPage::new("Edit Pet", format!("/pet/edit/{id}"), "Save") }

pub async fn add_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    add_meta().render(&state, Some(profile), &forms::pet_form(&PetInput::default(), None, false))
}

/// The owner is the active profile, attached after field validation.
pub async fn add(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Form(input): Form<PetInput>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    match pet_service::create_pet(&state.db, profile.id, &input).await {
        Ok(_) => Ok(see_other("/profile/")),
        Err(ServiceError::Validation(errors)) => {
            add_meta().render_invalid(&state, Some(profile), &forms::pet_form(&input, Some(&errors), false))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_page(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let pet = pet_service::get_owned_pet(&state.db, profile.id, id).await?;
    edit_meta(id).render(&state, Some(profile), &forms::pet_form(&PetInput::from_model(&pet), None, false))
}

pub async fn edit(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
    Form(input): Form<PetInput>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    match pet_service::update_pet(&state.db, profile.id, id, &input).await {
        Ok(_) => Ok(see_other("/profile/")),
        Err(ServiceError::Validation(errors)) => {
            edit_meta(id).render_invalid(&state, Some(profile), &forms::pet_form(&input, Some(&errors), false))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_page(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let pet = pet_service::get_owned_pet(&state.db, profile.id, id).await?;
    FormPage::new("Delete Pet", format!("/pet/delete/{id}"), "Delete")
        .danger()
        .render(&state, Some(profile), &forms::pet_form(&PetInput::from_model(&pet), None, true))
}

/// No form extractor: submitted field values are never read.
pub async fn delete(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    pet_service::confirm_delete_pet(&state.db, profile.id, id).await?;
    Ok(see_other("/profile/"))
}
