use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{SessionId, SubmissionStatus};
use super::form::ApplicationFormState;
use super::submission::ApplicationForm;
use super::validation::ValidationErrors;

/// Repository record for one form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub form: ApplicationForm,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn new(session_id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            form: ApplicationForm::new(),
            created_at,
            submitted_at: None,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            status: self.form.status(),
            values: self.form.state().clone(),
            errors: self.form.errors().clone(),
            created_at: self.created_at,
            submitted_at: self.submitted_at,
        }
    }
}

/// JSON shape of a session exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: SubmissionStatus,
    pub values: ApplicationFormState,
    pub errors: ValidationErrors,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Storage abstraction so the service can be exercised in isolation.
///
/// `modify` runs the closure while the record is held exclusively, which keeps edits and
/// submits for one session strictly ordered.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    fn modify<T, F>(&self, id: &SessionId, apply: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
