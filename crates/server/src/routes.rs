use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::AppError;
use crate::observability;
use crate::state::ServerState;

pub mod notes;
pub mod pages;
pub mod pets;
pub mod photos;
pub mod profile;
pub mod todos;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    observability::encode_metrics()
}

/// 303 to `path`; every successful form post ends here.
pub(crate) fn see_other(path: &str) -> Response {
    Redirect::to(path).into_response()
}

/// Build the full application router: petstagram, notes and todo pages plus
/// health and metrics endpoints.
pub fn build_router(state: ServerState, static_dir: &str) -> Router {
    let petstagram = Router::new()
        .route("/", get(pages::home))
        .route("/dashboard/", get(pages::dashboard))
        .route("/profile/", get(profile::details))
        .route("/profile/create/", get(profile::create_page).post(profile::create))
        .route("/profile/edit/", get(profile::edit_page).post(profile::edit))
        .route("/profile/delete/", get(profile::delete_page).post(profile::delete))
        .route("/pet/add/", get(pets::add_page).post(pets::add))
        .route("/pet/edit/:id", get(pets::edit_page).post(pets::edit))
        .route("/pet/delete/:id", get(pets::delete_page).post(pets::delete))
        .route("/photo/add/", get(photos::add_page).post(photos::add))
        .route("/photo/details/:id", get(photos::details))
        .route("/photo/edit/:id", get(photos::edit_page).post(photos::edit))
        .route("/photo/delete/:id", get(photos::delete_page).post(photos::delete))
        .route("/photo/like/:id", get(photos::like).post(photos::like));

    let notes = Router::new()
        .route("/notes/", get(notes::index))
        .route("/notes/add/", get(notes::add_page).post(notes::add))
        .route("/notes/edit/:id", get(notes::edit_page).post(notes::edit))
        .route("/notes/details/:id", get(notes::details))
        .route("/notes/delete/:id", get(notes::delete_page).post(notes::delete))
        .route("/notes/profile/", get(notes::profile_page));

    let ops = Router::new()
        .route("/todos/", get(todos::list))
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    observability::init();

    petstagram
        .merge(notes)
        .merge(ops)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Heading, target and button of a page rendered by `form.html`.
pub(crate) struct FormPage<'a> {
    heading: &'a str,
    action: String,
    submit: &'a str,
    danger: bool,
    image_url: Option<String>,
}

impl<'a> FormPage<'a> {
    pub(crate) fn new(heading: &'a str, action: impl Into<String>, submit: &'a str) -> Self {
        Self { heading, action: action.into(), submit, danger: false, image_url: None }
    }

    /// Destructive confirmation page.
    pub(crate) fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub(crate) fn image(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_string());
        self
    }

    pub(crate) fn render(
        self,
        state: &ServerState,
        active: Option<&models::profile::Model>,
        form: &crate::forms::FormView,
    ) -> Result<Response, AppError> {
        let mut ctx = crate::templates::page_context(active);
        ctx.insert("heading", self.heading);
        ctx.insert("action", &self.action);
        ctx.insert("submit", self.submit);
        ctx.insert("danger", &self.danger);
        ctx.insert("image_url", &self.image_url);
        ctx.insert("form", form);
        state.render("form.html", &ctx)
    }

    /// Same page again with the submitted values and their errors; nothing was saved.
    pub(crate) fn render_invalid(
        self,
        state: &ServerState,
        active: Option<&models::profile::Model>,
        form: &crate::forms::FormView,
    ) -> Result<Response, AppError> {
        observability::VALIDATION_FAILURES_TOTAL.inc();
        tracing::debug!(action = %self.action, errors = form.fields.iter().filter(|f| !f.errors.is_empty()).count(), "form rejected");
        self.render(state, active, form)
    }
}
