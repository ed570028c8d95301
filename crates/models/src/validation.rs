//! Field-level validation shared by every entity.
//!
//! Each entity module exposes a plain `validate` function that turns raw form
//! input into a typed draft or a [`FieldErrors`] map. Nothing here touches the
//! database; cross-row rules (pet uniqueness, tagged pets existing) live in the
//! service layer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use url::Url;

/// Key for errors that do not belong to a single field.
pub const NON_FIELD: &str = "__all__";

pub const REQUIRED: &str = "This field is required.";

/// Messages per field name, ordered so rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn single(field: &str, msg: impl Into<String>) -> Self {
        let mut e = Self::new();
        e.add(field, msg);
        e
    }

    pub fn add(&mut self, field: &str, msg: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(msg.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool { self.0.contains_key(field) }

    pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    /// `Ok(value)` when no error was collected.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msgs) in &self.0 {
            for m in msgs {
                if !first { f.write_str("; ")?; }
                write!(f, "{field}: {m}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trimmed non-empty text within `min..=max` characters.
pub fn required_text(errors: &mut FieldErrors, field: &str, raw: &str, min: usize, max: usize) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let len = v.chars().count();
    if len < min {
        errors.add(field, format!("Ensure this value has at least {min} characters (it has {len})."));
        return None;
    }
    if len > max {
        errors.add(field, format!("Ensure this value has at most {max} characters (it has {len})."));
        return None;
    }
    Some(v.to_string())
}

/// Empty input means "not provided".
pub fn optional_text(raw: &str) -> Option<String> {
    let v = raw.trim();
    (!v.is_empty()).then(|| v.to_string())
}

pub fn letters_only(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.chars().all(char::is_alphabetic) {
        true
    } else {
        errors.add(field, "Ensure this value contains only letters.");
        false
    }
}

/// Absolute `http`/`https` URL with a host; the stored value is the trimmed input.
pub fn required_url(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    if v.chars().any(char::is_whitespace) || !web_url(v) {
        errors.add(field, "Enter a valid URL.");
        return None;
    }
    Some(v.to_string())
}

fn web_url(v: &str) -> bool {
    let Ok(parsed) = Url::parse(v) else { return false };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    // the parser repairs `https:/x` and `https:///x`; only an explicit authority counts
    let authority = v.get(parsed.scheme().len()..).unwrap_or_default();
    if !authority.starts_with("://") || authority[3..].starts_with(['/', '\\']) {
        return false;
    }
    match parsed.host_str() {
        // `a..b` parses, but no resolver accepts an empty label
        Some(host) => !host.is_empty() && !host.trim_end_matches('.').split('.').any(str::is_empty),
        None => false,
    }
}

pub fn optional_email(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<String> {
    let v = optional_text(raw)?;
    let valid = !v.chars().any(char::is_whitespace)
        && match v.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains('@')
            }
            None => false,
        };
    if valid {
        Some(v)
    } else {
        errors.add(field, "Enter a valid email address.");
        None
    }
}

pub const MIN_BIRTH_YEAR: i32 = 1920;

/// Dates arrive as `YYYY-MM-DD` from `<input type="date">`.
pub fn parse_date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

pub fn birth_date(errors: &mut FieldErrors, field: &str, raw: &str, required: bool) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        if required { errors.add(field, REQUIRED); }
        return None;
    }
    let d = parse_date(errors, field, raw)?;
    let today = Utc::now().date_naive();
    if d.year() < MIN_BIRTH_YEAR {
        errors.add(field, format!("Year must be {MIN_BIRTH_YEAR} or later."));
        return None;
    }
    if d > today {
        errors.add(field, "Date of birth cannot be in the future.");
        return None;
    }
    Some(d)
}
