use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service::ActiveProfileContext;

use crate::errors::AppError;
use crate::state::ServerState;

/// The active profile, resolved once per request.
pub struct ActiveProfile(pub ActiveProfileContext);

#[async_trait]
impl FromRequestParts<ServerState> for ActiveProfile {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        Ok(Self(ActiveProfileContext::resolve(&state.db).await?))
    }
}
