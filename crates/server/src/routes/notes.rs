use axum::extract::{Path, State};
use axum::response::Response;
use axum_extra::extract::Form;
use models::note::NoteInput;
use service::errors::ServiceError;
use service::note_service;

use crate::errors::AppError;
use crate::extractors::ActiveProfile;
use crate::forms;
use crate::routes::{see_other, FormPage};
use crate::state::ServerState;
use crate::templates::page_context;

const INDEX: &str = "/notes/";

fn add_meta() -> FormPage<'static> { FormPage::new("Add Note", "/notes/add/", "Add") }

fn edit_meta(id: i32) -> FormPage<'static> { FormPage::new("Edit Note", format!("/notes/edit/{id}"), "Save") }

/// Every note; without a profile the visitor is sent to create one.
pub async fn index(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let notes = note_service::list_notes(&state.db).await?;
    let mut page = page_context(Some(profile));
    page.insert("notes", &notes);
    state.render("notes_index.html", &page)
}

pub async fn add_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    add_meta().render(&state, ctx.profile(), &forms::note_form(&NoteInput::default(), None, false))
}

pub async fn add(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Form(input): Form<NoteInput>,
) -> Result<Response, AppError> {
    match note_service::create_note(&state.db, &input).await {
        Ok(_) => Ok(see_other(INDEX)),
        Err(ServiceError::Validation(errors)) => {
            add_meta().render_invalid(&state, ctx.profile(), &forms::note_form(&input, Some(&errors), false))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_page(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let note = note_service::get_note(&state.db, id).await?;
    edit_meta(id).render(&state, ctx.profile(), &forms::note_form(&NoteInput::from_model(&note), None, false))
}

pub async fn edit(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
    Form(input): Form<NoteInput>,
) -> Result<Response, AppError> {
    match note_service::update_note(&state.db, id, &input).await {
        Ok(_) => Ok(see_other(INDEX)),
        Err(ServiceError::Validation(errors)) => {
            edit_meta(id).render_invalid(&state, ctx.profile(), &forms::note_form(&input, Some(&errors), false))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn details(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let note = note_service::get_note(&state.db, id).await?;
    let mut page = page_context(ctx.profile());
    page.insert("note", &note);
    state.render("note_details.html", &page)
}

pub async fn delete_page(
    State(state): State<ServerState>,
    ActiveProfile(ctx): ActiveProfile,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let note = note_service::get_note(&state.db, id).await?;
    FormPage::new("Delete Note", format!("/notes/delete/{id}"), "Delete")
        .danger()
        .image(&note.image_url)
        .render(&state, ctx.profile(), &forms::note_form(&NoteInput::from_model(&note), None, true))
}

/// Deletes by id only; any posted fields are ignored.
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Response, AppError> {
    note_service::confirm_delete_note(&state.db, id).await?;
    Ok(see_other(INDEX))
}

pub async fn profile_page(State(state): State<ServerState>, ActiveProfile(ctx): ActiveProfile) -> Result<Response, AppError> {
    let profile = ctx.require()?;
    let count = note_service::count_notes(&state.db).await?;
    let mut page = page_context(Some(profile));
    page.insert("profile", profile);
    page.insert("full_name", &profile.full_name());
    page.insert("note_count", &count);
    state.render("notes_profile.html", &page)
}
