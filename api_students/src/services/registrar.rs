use std::sync::Arc;

use common::error::Res;

use crate::models::draft::RegistrationDraft;
use crate::services::form::{SubmitOutcome, on_submit};

/// Receives drafts that passed validation.
pub trait StudentSubmitter: Send + Sync {
    fn submit(&self, draft: &RegistrationDraft) -> Res<()>;
}

/// Stand-in submitter until a student store exists: records the
/// registration in the log and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSubmitter;

impl StudentSubmitter for LogSubmitter {
    fn submit(&self, draft: &RegistrationDraft) -> Res<()> {
        log::info!("{}", registration_log_line(draft));
        Ok(())
    }
}

// Only the email; names and passwords stay out of the log.
fn registration_log_line(draft: &RegistrationDraft) -> String {
    format!("Student registered: {}", draft.email)
}

/// Validates drafts and hands accepted ones to the submitter.
#[derive(Clone)]
pub struct Registrar {
    submitter: Arc<dyn StudentSubmitter>,
}

impl Registrar {
    pub fn new(submitter: Arc<dyn StudentSubmitter>) -> Self {
        Self { submitter }
    }

    pub fn register(&self, draft: &RegistrationDraft) -> Res<SubmitOutcome> {
        let outcome = on_submit(draft);
        match &outcome {
            SubmitOutcome::Accepted => self.submitter.submit(draft)?,
            SubmitOutcome::Rejected(errors) => {
                log::debug!(
                    "Registration rejected: {} failing field(s)",
                    errors.failing().count()
                );
            }
        }
        Ok(outcome)
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new(Arc::new(LogSubmitter))
    }
}
