use serde::Serialize;

use super::domain::{FieldName, FieldValue, SubmissionStatus};
use super::form::{ApplicationFormState, FormError};
use super::validation::{validate, ValidationErrors};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub accepted: bool,
    pub errors: ValidationErrors,
}

/// Decide whether `state` may be submitted. Accepted exactly when validation finds nothing.
pub fn submit(state: &ApplicationFormState) -> SubmissionOutcome {
    let errors = validate(state);
    SubmissionOutcome {
        accepted: errors.is_empty(),
        errors,
    }
}

/// One form session: field values, the errors from the latest submit, and the lifecycle status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationForm {
    state: ApplicationFormState,
    errors: ValidationErrors,
    status: SubmissionStatus,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ApplicationFormState {
        &self.state
    }

    /// Errors recorded by the most recent rejected submit. Edits do not refresh them.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }

    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        if self.is_submitted() {
            return Err(FormError::AlreadySubmitted);
        }
        self.state.set_field(field, value)
    }

    /// Validate and either keep the errors for display or move to `Submitted`.
    ///
    /// A submitted session is terminal, so submitting again reports acceptance without
    /// re-running validation.
    pub fn submit(&mut self) -> SubmissionOutcome {
        if self.is_submitted() {
            return SubmissionOutcome {
                accepted: true,
                errors: ValidationErrors::new(),
            };
        }

        let outcome = submit(&self.state);
        if outcome.accepted {
            self.errors = ValidationErrors::new();
            self.status = SubmissionStatus::Submitted;
        } else {
            self.errors = outcome.errors.clone();
        }
        outcome
    }
}
