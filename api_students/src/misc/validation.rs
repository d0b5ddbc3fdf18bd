//! Field rules for the student registration form.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::models::draft::{Field, RegistrationDraft};

pub const MIN_PASSWORD_LEN: usize = 6;

// Minimal `local@domain.tld` shape, not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidFormat,
    TooShort,
    PasswordsDoNotMatch,
}

impl FieldError {
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidFormat => "invalid format",
            FieldError::TooShort => "too short",
            FieldError::PasswordsDoNotMatch => "passwords do not match",
        }
    }

    /// Message shown next to `field`.
    pub fn message(&self, field: Field) -> String {
        match self {
            FieldError::Required => format!("{} is required", field.label()),
            FieldError::InvalidFormat => format!("{} is invalid", field.label()),
            FieldError::TooShort => format!(
                "{} must be at least {} characters",
                field.label(),
                MIN_PASSWORD_LEN
            ),
            FieldError::PasswordsDoNotMatch => "Passwords do not match".to_string(),
        }
    }
}

/// Per-field validation messages.
///
/// A field mapped to `Some` currently fails its rule. A field that is
/// absent, or mapped to `None` after an edit cleared it, is valid or
/// unchecked. Cleared entries serialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet(BTreeMap<Field, Option<FieldError>>);

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied().flatten()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, Some(error));
    }

    /// Marks `field` as cleared, keeping its entry.
    pub fn clear(&mut self, field: Field) {
        self.0.insert(field, None);
    }

    pub fn contains_key(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// True when no field currently fails.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    pub fn failing(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0
            .iter()
            .filter_map(|(field, error)| error.map(|error| (*field, error)))
    }
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            let message = error.map(|e| e.message(*field)).unwrap_or_default();
            map.serialize_entry(field.as_str(), &message)?;
        }
        map.end()
    }
}

pub fn validate_email(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::Required);
    }
    if !EMAIL_SHAPE.is_match(value) {
        return Some(FieldError::InvalidFormat);
    }
    None
}

pub fn validate_password(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::Required);
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Some(FieldError::TooShort);
    }
    None
}

fn validate_required(value: &str) -> Option<FieldError> {
    value.is_empty().then_some(FieldError::Required)
}

/// Runs every field rule plus the password confirmation check.
///
/// Returns the full error set and whether the draft passed.
pub fn validate_all(draft: &RegistrationDraft) -> (ErrorSet, bool) {
    let checks = [
        (Field::Email, validate_email(&draft.email)),
        (Field::FirstName, validate_required(&draft.first_name)),
        (Field::LastName, validate_required(&draft.last_name)),
        (Field::Password, validate_password(&draft.password)),
        (
            Field::ConfirmPassword,
            (draft.confirm_password != draft.password).then_some(FieldError::PasswordsDoNotMatch),
        ),
    ];

    let mut errors = ErrorSet::new();
    for (field, error) in checks {
        if let Some(error) = error {
            errors.insert(field, error);
        }
    }
    let is_valid = errors.is_empty();
    (errors, is_valid)
}
