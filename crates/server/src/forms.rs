//! View models for HTML forms. Handlers turn raw input plus collected
//! [`FieldErrors`] into a [`FormView`] that `form.html` renders generically.

use models::validation::{FieldErrors, NON_FIELD};
use models::{note, pet, pet_photo, profile};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    /// `text`, `url`, `email`, `date`, `textarea`, `select` or `multiselect`.
    pub kind: &'static str,
    pub value: String,
    pub choices: Vec<Choice>,
    pub errors: Vec<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub non_field_errors: Vec<String>,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&FieldView> { self.fields.iter().find(|f| f.name == name) }
}

struct FormBuilder<'a> {
    errors: Option<&'a FieldErrors>,
    disabled: bool,
    fields: Vec<FieldView>,
}

impl<'a> FormBuilder<'a> {
    fn new(errors: Option<&'a FieldErrors>) -> Self { Self { errors, disabled: false, fields: Vec::new() } }

    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn push(mut self, name: &'static str, label: &'static str, kind: &'static str, value: &str, choices: Vec<Choice>) -> Self {
        let errors = self.errors.map(|e| e.get(name).to_vec()).unwrap_or_default();
        self.fields.push(FieldView { name, label, kind, value: value.to_string(), choices, errors, disabled: self.disabled });
        self
    }

    fn input(self, name: &'static str, label: &'static str, kind: &'static str, value: &str) -> Self {
        self.push(name, label, kind, value, Vec::new())
    }

    fn select(self, name: &'static str, label: &'static str, options: Vec<String>, value: &str) -> Self {
        let choices = options
            .into_iter()
            .map(|o| Choice { selected: o == value, label: o.clone(), value: o })
            .collect();
        self.push(name, label, "select", value, choices)
    }

    fn build(self) -> FormView {
        let non_field_errors = self.errors.map(|e| e.get(NON_FIELD).to_vec()).unwrap_or_default();
        FormView { fields: self.fields, non_field_errors }
    }
}

fn pet_choices(pets: &[pet::Model], selected: &[i32]) -> Vec<Choice> {
    pets.iter()
        .map(|p| Choice { value: p.id.to_string(), label: p.name.clone(), selected: selected.contains(&p.id) })
        .collect()
}

pub fn profile_create_form(input: &profile::ProfileInput, errors: Option<&FieldErrors>) -> FormView {
    FormBuilder::new(errors)
        .input("first_name", "First Name", "text", &input.first_name)
        .input("last_name", "Last Name", "text", &input.last_name)
        .input("profile_picture", "Link to Profile Picture", "url", &input.profile_picture)
        .build()
}

pub fn profile_form(input: &profile::ProfileInput, errors: Option<&FieldErrors>, disabled: bool) -> FormView {
    FormBuilder::new(errors)
        .disabled(disabled)
        .input("first_name", "First Name", "text", &input.first_name)
        .input("last_name", "Last Name", "text", &input.last_name)
        .input("profile_picture", "Link to Profile Picture", "url", &input.profile_picture)
        .input("date_of_birth", "Date of Birth", "date", &input.date_of_birth)
        .input("email", "Email", "email", &input.email)
        .select("gender", "Gender", profile::Gender::labels(), &input.gender)
        .input("description", "Description", "textarea", &input.description)
        .build()
}

pub fn pet_form(input: &pet::PetInput, errors: Option<&FieldErrors>, disabled: bool) -> FormView {
    FormBuilder::new(errors)
        .disabled(disabled)
        .input("name", "Pet Name", "text", &input.name)
        .select("type", "Type", pet::PetType::labels(), &input.pet_type)
        .input("date_of_birth", "Day of Birth", "date", &input.date_of_birth)
        .build()
}

pub fn photo_create_form(input: &pet_photo::PhotoInput, pets: &[pet::Model], errors: Option<&FieldErrors>) -> FormView {
    FormBuilder::new(errors)
        .input("photo", "Pet Image", "url", &input.photo)
        .input("description", "Description", "textarea", &input.description)
        .push("tagged_pets", "Tag Pets", "multiselect", "", pet_choices(pets, &input.tagged_pets))
        .build()
}

pub fn photo_edit_form(input: &pet_photo::PhotoEditInput, pets: &[pet::Model], errors: Option<&FieldErrors>) -> FormView {
    FormBuilder::new(errors)
        .input("description", "Description", "textarea", &input.description)
        .push("tagged_pets", "Tag Pets", "multiselect", "", pet_choices(pets, &input.tagged_pets))
        .build()
}

pub fn note_form(input: &note::NoteInput, errors: Option<&FieldErrors>, disabled: bool) -> FormView {
    FormBuilder::new(errors)
        .disabled(disabled)
        .input("title", "Title", "text", &input.title)
        .input("image_url", "Link to Image", "url", &input.image_url)
        .input("content", "Content", "textarea", &input.content)
        .build()
}
