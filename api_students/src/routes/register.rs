use actix_web::{HttpResponse, Responder, post, web};
use common::error::Res;
use common::http::Success;

use crate::dtos::register::{RegisterAccepted, RegisterRejected, ValidationResponse};
use crate::misc::validation::validate_all;
use crate::models::draft::RegistrationDraft;
use crate::services::{form::SubmitOutcome, registrar::Registrar};

/// Validates a draft without submitting it.
///
/// # Input
/// - `draft`: JSON registration draft (`email`, `firstName`, `lastName`,
///   `password`, `confirmPassword`); missing fields are treated as empty
///
/// # Output
/// - Always 200 with `{ "valid": bool, "errors": { field: message } }`
#[post("/validate")]
async fn post_validate(draft: web::Json<RegistrationDraft>) -> Res<impl Responder> {
    let (errors, valid) = validate_all(&draft);
    Success::ok(ValidationResponse { valid, errors })
}

/// Registers a student.
///
/// # Input
/// - `draft`: JSON registration draft
/// - `registrar`: validation plus the submission collaborator
///
/// # Output
/// - Success: 201 with `{ "status": "accepted", "email": … }`
/// - Error: 400 with `{ "errors": { field: message } }`; nothing is submitted
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/students/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'ada@example.com',
///     firstName: 'Ada',
///     lastName: 'Lovelace',
///     password: 'engine1',
///     confirmPassword: 'engine1'
///   })
/// });
///
/// if (response.status === 400) {
///   const { errors } = await response.json();
///   // errors.email, errors.password, ... hold inline messages
/// }
/// ```
#[post("/register")]
async fn post_register(
    draft: web::Json<RegistrationDraft>,
    registrar: web::Data<Registrar>,
) -> Res<HttpResponse> {
    let draft = draft.into_inner();
    match registrar.register(&draft)? {
        SubmitOutcome::Accepted => Ok(HttpResponse::Created().json(RegisterAccepted {
            status: "accepted",
            email: draft.email,
        })),
        SubmitOutcome::Rejected(errors) => {
            Ok(HttpResponse::BadRequest().json(RegisterRejected { errors }))
        }
    }
}
