//! Registration form state and the reducer driving it.

use serde::Serialize;

use crate::misc::validation::{ErrorSet, validate_all};
use crate::models::draft::{Field, RegistrationDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Editing,
    Accepted,
    Rejected,
}

/// Everything the registration form tracks between events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: RegistrationDraft,
    pub errors: ErrorSet,
    pub show_password: bool,
    pub show_confirm_password: bool,
    pub status: FormStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged { field: Field, value: String },
    TogglePasswordVisibility,
    ToggleConfirmPasswordVisibility,
    Submit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(ErrorSet),
}

/// Writes `value` into `field` and clears that field's error.
///
/// The field is not re-validated; its error comes back on the next
/// full validation if the value is still bad.
pub fn on_field_change(
    mut draft: RegistrationDraft,
    mut errors: ErrorSet,
    field: Field,
    value: String,
) -> (RegistrationDraft, ErrorSet) {
    draft.set(field, value);
    errors.clear(field);
    (draft, errors)
}

pub fn on_submit(draft: &RegistrationDraft) -> SubmitOutcome {
    match validate_all(draft) {
        (_, true) => SubmitOutcome::Accepted,
        (errors, false) => SubmitOutcome::Rejected(errors),
    }
}

pub fn apply_event(state: FormState, event: FormEvent) -> FormState {
    match event {
        FormEvent::FieldChanged { field, value } => {
            let (draft, errors) = on_field_change(state.draft, state.errors, field, value);
            FormState {
                draft,
                errors,
                status: FormStatus::Editing,
                ..state
            }
        }
        FormEvent::TogglePasswordVisibility => FormState {
            show_password: !state.show_password,
            ..state
        },
        FormEvent::ToggleConfirmPasswordVisibility => FormState {
            show_confirm_password: !state.show_confirm_password,
            ..state
        },
        FormEvent::Submit => match on_submit(&state.draft) {
            SubmitOutcome::Accepted => FormState {
                errors: ErrorSet::new(),
                status: FormStatus::Accepted,
                ..state
            },
            SubmitOutcome::Rejected(errors) => FormState {
                errors,
                status: FormStatus::Rejected,
                ..state
            },
        },
    }
}
