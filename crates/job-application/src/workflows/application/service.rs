use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{FieldName, FieldValue, SessionId};
use super::form::FormError;
use super::presentation::PostingDetails;
use super::repository::{RepositoryError, SessionRecord, SessionRepository};
use super::submission::SubmissionOutcome;

/// Service hosting application form sessions for one job posting.
pub struct ApplicationFormService<R> {
    repository: Arc<R>,
    posting: Arc<PostingDetails>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> ApplicationFormService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, posting: PostingDetails) -> Self {
        Self {
            repository,
            posting: Arc::new(posting),
        }
    }

    pub fn posting(&self) -> &PostingDetails {
        &self.posting
    }

    /// Open a blank form session.
    pub fn start(&self) -> Result<SessionRecord, ApplicationServiceError> {
        let record = SessionRecord::new(next_session_id(), Utc::now());
        let stored = self.repository.insert(record)?;
        info!(session_id = %stored.session_id, "application session started");
        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Replace one field value in the session.
    pub fn set_field(
        &self,
        session_id: &SessionId,
        field: FieldName,
        value: FieldValue,
    ) -> Result<SessionRecord, ApplicationServiceError> {
        let record = self.repository.modify(session_id, |record| {
            record.form.set_field(field, value)?;
            Ok::<_, FormError>(record.clone())
        })??;
        debug!(%session_id, %field, "field updated");
        Ok(record)
    }

    /// Run the submit decision for the session's current values.
    pub fn submit(
        &self,
        session_id: &SessionId,
    ) -> Result<(SubmissionOutcome, SessionRecord), ApplicationServiceError> {
        self.apply_and_submit(session_id, Vec::new())
    }

    /// Apply a batch of edits, then submit, without other requests interleaving.
    ///
    /// Edits are skipped once the session is submitted; the terminal outcome is reported.
    pub fn apply_and_submit(
        &self,
        session_id: &SessionId,
        edits: Vec<(FieldName, FieldValue)>,
    ) -> Result<(SubmissionOutcome, SessionRecord), ApplicationServiceError> {
        let (outcome, record, newly_submitted) = self.repository.modify(session_id, |record| {
            let was_submitted = record.form.is_submitted();
            if !was_submitted {
                for (field, value) in edits {
                    record.form.set_field(field, value)?;
                }
            }

            let outcome = record.form.submit();
            let newly_submitted = !was_submitted && record.form.is_submitted();
            if newly_submitted {
                record.submitted_at = Some(Utc::now());
            }
            Ok::<_, FormError>((outcome, record.clone(), newly_submitted))
        })??;

        if newly_submitted {
            info!(%session_id, "application submitted");
        } else if !outcome.accepted {
            let fields: Vec<&str> = outcome.errors.fields().map(FieldName::as_str).collect();
            debug!(%session_id, ?fields, "submission blocked by validation");
        }

        Ok((outcome, record))
    }
}

/// Error raised by the application form service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
