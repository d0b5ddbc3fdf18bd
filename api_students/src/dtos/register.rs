use serde::Serialize;

use crate::misc::validation::ErrorSet;

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: ErrorSet,
}

#[derive(Debug, Serialize)]
pub struct RegisterAccepted {
    pub status: &'static str,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRejected {
    pub errors: ErrorSet,
}
