use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use service::errors::ServiceError;
use service::NoActiveProfile;
use thiserror::Error;
use tracing::{error, warn};

pub const PROFILE_CREATE_PATH: &str = "/profile/create/";

/// Everything a page handler can fail with. Form validation is not here:
/// handlers re-render the form instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// No profile exists yet; answered with a redirect to profile creation.
    #[error("profile required")]
    ProfileRequired,
    #[error("{0}")]
    NotFound(String),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<NoActiveProfile> for AppError {
    fn from(_: NoActiveProfile) -> Self { Self::ProfileRequired }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<!doctype html><html><head><title>{title}</title></head><body><h1>{code} {title}</h1><p>{message}</p><a href=\"/\">Home</a></body></html>",
        code = status.as_u16(),
    );
    (status, Html(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ProfileRequired => Redirect::to(PROFILE_CREATE_PATH).into_response(),
            AppError::NotFound(msg) => {
                warn!(error = %msg, "not found");
                error_page(StatusCode::NOT_FOUND, &msg)
            }
            other => {
                error!(error = %other, "request failed");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let nf: AppError = ServiceError::not_found("pet").into();
        assert_eq!(nf.into_response().status(), StatusCode::NOT_FOUND);
        let db: AppError = ServiceError::Db("boom".into()).into();
        assert_eq!(db.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_profile_redirects() {
        let res = AppError::from(NoActiveProfile).into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], PROFILE_CREATE_PATH);
    }
}
