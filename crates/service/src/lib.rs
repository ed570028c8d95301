//! Service layer: the business rules of the notes, petstagram and todo apps
//! on top of the `models` entities.
//! - Active profile resolution and profile-scoped reads.
//! - Validated writes; form errors come back as `ServiceError::Validation`.
//! - Multi-row writes (profile cascade, photo tagging, likes) run in a transaction.

pub mod errors;
pub mod active_profile;
pub mod profile_service;
pub mod pet_service;
pub mod photo_service;
pub mod note_service;
pub mod todo_service;
#[cfg(test)]
pub mod test_support;

pub use active_profile::{ActiveProfileContext, NoActiveProfile};
