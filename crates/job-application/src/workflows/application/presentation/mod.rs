//! Page model and HTML rendering for the application form.

mod html;
pub mod layout;

use serde::{Deserialize, Serialize};

use super::domain::{FieldName, ResumeFile};
use super::submission::ApplicationForm;

pub use html::{escape_html, Page};
pub use layout::{Columns, Control, FieldSpec, SectionHint, SectionSpec, FORM_SECTIONS};

/// Branding and job details shown around the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDetails {
    pub brand_name: String,
    pub job_title: String,
    pub job_meta: String,
    pub office_location: String,
    pub footer_note: String,
}

impl Default for PostingDetails {
    fn default() -> Self {
        Self {
            brand_name: "Whoop".to_string(),
            job_title: "Senior Machine Learning Engineer (Health)".to_string(),
            job_meta: "Boston, MA · Data Science & Research · On-site".to_string(),
            office_location: "Boston, MA".to_string(),
            footer_note: "Test environment for AI agent research".to_string(),
        }
    }
}

impl PostingDetails {
    pub fn hint_text(&self, hint: SectionHint) -> String {
        match hint {
            SectionHint::OfficeExpectation => format!(
                "This is an on-site position, working out of our {} office a minimum of 4 days \
                 per week. Does this setup align to the working environment you are seeking in \
                 your next opportunity?",
                self.office_location
            ),
            SectionHint::Text(text) => text.to_string(),
        }
    }
}

/// What a session shows: the editable form or the terminal confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView<'a> {
    Form(Vec<SectionView<'a>>),
    Submitted,
    /// Session id did not resolve; offers a fresh start.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<'a> {
    pub spec: &'static SectionSpec,
    pub fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub spec: &'static FieldSpec,
    pub value: &'a str,
    pub resume: Option<&'a ResumeFile>,
    pub error: Option<&'a str>,
}

impl FieldView<'_> {
    pub fn field(&self) -> FieldName {
        self.spec.field
    }

    pub fn is_required(&self) -> bool {
        self.spec.field.is_required()
    }
}

impl<'a> PageView<'a> {
    pub fn of(form: &'a ApplicationForm) -> Self {
        if form.is_submitted() {
            return PageView::Submitted;
        }

        let state = form.state();
        let errors = form.errors();
        let sections = FORM_SECTIONS
            .iter()
            .map(|spec| SectionView {
                spec,
                fields: spec
                    .fields
                    .iter()
                    .map(|field_spec| FieldView {
                        spec: field_spec,
                        value: state.text(field_spec.field).unwrap_or_default(),
                        resume: match field_spec.field {
                            FieldName::Resume => state.resume.as_ref(),
                            _ => None,
                        },
                        error: errors.get(field_spec.field),
                    })
                    .collect(),
            })
            .collect();

        PageView::Form(sections)
    }
}
