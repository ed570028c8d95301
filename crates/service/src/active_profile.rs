//! The single-profile model: the first-created profile is the identity every
//! profile-scoped page works with.

use models::profile;
use sea_orm::ConnectionTrait;
use thiserror::Error;
use tracing::debug;

use crate::errors::ServiceError;

/// No profile exists yet. Callers redirect to profile creation; this is a
/// normal branch, not a failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no profile exists yet")]
pub struct NoActiveProfile;

/// Request-scoped view of the active profile, resolved once per request and
/// handed to every handler that needs it.
#[derive(Debug, Clone, Default)]
pub struct ActiveProfileContext {
    profile: Option<profile::Model>,
}

impl ActiveProfileContext {
    /// Lowest id wins; later profiles are never active.
    pub async fn resolve<C: ConnectionTrait>(db: &C) -> Result<Self, ServiceError> {
        let profile = profile::first(db).await?;
        debug!(active_profile = ?profile.as_ref().map(|p| p.id), "resolved active profile");
        Ok(Self { profile })
    }

    pub fn from_profile(profile: Option<profile::Model>) -> Self { Self { profile } }

    pub fn profile(&self) -> Option<&profile::Model> { self.profile.as_ref() }

    pub fn is_present(&self) -> bool { self.profile.is_some() }

    pub fn require(&self) -> Result<&profile::Model, NoActiveProfile> {
        self.profile.as_ref().ok_or(NoActiveProfile)
    }

    pub fn into_profile(self) -> Option<profile::Model> { self.profile }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_profile};

    #[tokio::test]
    async fn absent_without_profiles() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ctx = ActiveProfileContext::resolve(&db).await?;
        assert!(!ctx.is_present());
        assert_eq!(ctx.require().unwrap_err(), NoActiveProfile);
        Ok(())
    }

    #[tokio::test]
    async fn first_created_profile_always_wins() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = seed_profile(&db, "First").await?;
        for name in ["Second", "Third", "Fourth"] {
            seed_profile(&db, name).await?;
            let ctx = ActiveProfileContext::resolve(&db).await?;
            assert_eq!(ctx.require()?.id, first.id);
            assert_eq!(ctx.profile().map(|p| p.first_name.as_str()), Some("First"));
        }
        Ok(())
    }
}
