//! SeaORM entities for the notes, petstagram and todo apps, plus the plain
//! per-entity validation functions that turn raw form input into drafts.

pub mod errors;
pub mod validation;
pub mod db;
pub mod profile;
pub mod pet;
pub mod pet_photo;
pub mod pet_photo_tagged_pet;
pub mod note;
pub mod todo;

#[cfg(test)]
mod tests;
