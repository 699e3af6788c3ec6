//! Single-page job application form.
//!
//! `form` holds field values, `validation` checks them, `submission` decides whether a session
//! moves to its terminal submitted state, and `presentation` renders either view. The service,
//! repository, and router host many sessions behind an HTTP surface.

pub mod domain;
pub mod form;
pub mod presentation;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;
pub mod upload;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ChoiceOption, FieldKind, FieldName, FieldValue, ResumeFile, SessionId, SubmissionStatus,
    GENDER_OPTIONS, RACE_OPTIONS, VETERAN_STATUS_OPTIONS, YES_NO_OPTIONS,
};
pub use form::{ApplicationFormState, FormError};
pub use presentation::{Page, PageView, PostingDetails};
pub use repository::{RepositoryError, SessionRecord, SessionRepository, SessionView};
pub use router::application_router;
pub use service::{ApplicationFormService, ApplicationServiceError};
pub use submission::{submit, ApplicationForm, SubmissionOutcome};
pub use upload::{accept_resume, UploadRejected};
pub use validation::{validate, ValidationErrors};
