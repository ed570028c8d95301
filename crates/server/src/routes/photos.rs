use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Form;
use models::pet_photo::{PhotoEditInput, PhotoInput};
use service::errors::ServiceError;
use service::{pet_service, photo_service};

use crate::errors::AppError;
use crate::extractors::ActiveProfile;
use crate::forms::{self, FormView};
use crate::observability::PHOTO_LIKES_TOTAL;
use crate::routes::{see_other, FormPage};
use crate::state::ServerState;
use crate::templates::page_context;

fn add_meta() -> FormPage<'static> { FormPage::new("Add Photo", "/photo/add/", "Add Photo") }

fn edit_meta(id: i32) -> FormPage<'static> { FormPage::new("Edit Photo", format!("/photo/edit/{id}"), "Save") }

fn details_path(id: i32) -> String { format!("/photo/details/{id}") }

pub async fn add_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let pets = pet_service::all_pets(&state.db).await?;
    add_meta().render(&state, Some(profile), &forms::photo_create_form(&PhotoInput::default(), &pets, None))
}

pub async fn add(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Form(input): Form<PhotoInput>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    match photo_service::create_photo(&state.db, &input).await {
        Ok(_) => Ok(see_other("/dashboard/")),
        Err(ServiceError::Validation(errors)) => {
            let pets = pet_service::all_pets(&state.db).await?;
            add_meta().render_invalid(&state, Some(profile), &forms::photo_create_form(&input, &pets, Some(&errors)))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn details(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let photo = photo_service::get_photo(&state.db, id).await?;
    let mut page = page_context(Some(profile));
    page.insert("item", &photo);
    state.render("photo_details.html", &page)
}

pub async fn edit_page(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let current = photo_service::get_photo(&state.db, id).await?;
    let input = PhotoEditInput {
        description: current.photo.description.clone().unwrap_or_default(),
        tagged_pets: current.tagged_pets.iter().map(|p| p.id).collect(),
    };
    let pets = pet_service::all_pets(&state.db).await?;
    edit_meta(id)
        .image(&current.photo.photo)
        .render(&state, Some(profile), &forms::photo_edit_form(&input, &pets, None))
}

/// Description and tags only; the image and likes stay as stored.
pub async fn edit(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
    Form(input): Form<PhotoEditInput>,
) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    match photo_service::update_photo(&state.db, id, &input).await {
        Ok(_) => Ok(see_other(&details_path(id))),
        Err(ServiceError::Validation(errors)) => {
            let pets = pet_service::all_pets(&state.db).await?;
            edit_meta(id).render_invalid(&state, Some(profile), &forms::photo_edit_form(&input, &pets, Some(&errors)))
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
    let current = photo_service::get_photo(&state.db, id).await?;
    FormPage::new("Delete Photo", format!("/photo/delete/{id}"), "Delete")
        .danger()
        .image(&current.photo.photo)
        .render(&state, Some(profile), &FormView::default())
}

pub async fn delete(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    ctx.require()?;
    photo_service::delete_photo(&state.db, id).await?;
    Ok(see_other("/dashboard/"))
}

pub async fn like(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Response, AppError> {
    photo_service::increment_likes(&state.db, id).await?;
    PHOTO_LIKES_TOTAL.inc();
    Ok(see_other(&details_path(id)))
}
