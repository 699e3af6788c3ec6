use serde::{Deserialize, Serialize};

use super::domain::{FieldKind, FieldName, FieldValue, ResumeFile};

/// Current values of every field in one form session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationFormState {
    pub resume: Option<ResumeFile>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub current_location: String,
    pub current_company: String,
    pub linkedin: String,
    pub twitter: String,
    pub github: String,
    pub portfolio: String,
    pub other_website: String,
    pub four_day_office_expectation: String,
    pub work_auth_us: String,
    pub needs_sponsorship: String,
    pub additional_info: String,
    pub gender: String,
    pub race: String,
    pub veteran_status: String,
}

impl ApplicationFormState {
    /// Replace exactly one field. Values are stored as given; nothing is validated here.
    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        match value.into() {
            FieldValue::Resume(resume) if field == FieldName::Resume => {
                self.resume = resume;
                Ok(())
            }
            FieldValue::Text(text) => match self.text_slot_mut(field) {
                Some(slot) => {
                    *slot = text;
                    Ok(())
                }
                None => Err(FormError::TypeMismatch {
                    field,
                    expected: field.kind(),
                    found: FieldKind::Text,
                }),
            },
            FieldValue::Resume(_) => Err(FormError::TypeMismatch {
                field,
                expected: field.kind(),
                found: FieldKind::File,
            }),
        }
    }

    /// String value of a text or choice field. `None` for the resume.
    pub fn text(&self, field: FieldName) -> Option<&str> {
        let value = match field {
            FieldName::Resume => return None,
            FieldName::FullName => &self.full_name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::CurrentLocation => &self.current_location,
            FieldName::CurrentCompany => &self.current_company,
            FieldName::Linkedin => &self.linkedin,
            FieldName::Twitter => &self.twitter,
            FieldName::Github => &self.github,
            FieldName::Portfolio => &self.portfolio,
            FieldName::OtherWebsite => &self.other_website,
            FieldName::FourDayOfficeExpectation => &self.four_day_office_expectation,
            FieldName::WorkAuthUs => &self.work_auth_us,
            FieldName::NeedsSponsorship => &self.needs_sponsorship,
            FieldName::AdditionalInfo => &self.additional_info,
            FieldName::Gender => &self.gender,
            FieldName::Race => &self.race,
            FieldName::VeteranStatus => &self.veteran_status,
        };
        Some(value.as_str())
    }

    fn text_slot_mut(&mut self, field: FieldName) -> Option<&mut String> {
        let slot = match field {
            FieldName::Resume => return None,
            FieldName::FullName => &mut self.full_name,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
            FieldName::CurrentLocation => &mut self.current_location,
            FieldName::CurrentCompany => &mut self.current_company,
            FieldName::Linkedin => &mut self.linkedin,
            FieldName::Twitter => &mut self.twitter,
            FieldName::Github => &mut self.github,
            FieldName::Portfolio => &mut self.portfolio,
            FieldName::OtherWebsite => &mut self.other_website,
            FieldName::FourDayOfficeExpectation => &mut self.four_day_office_expectation,
            FieldName::WorkAuthUs => &mut self.work_auth_us,
            FieldName::NeedsSponsorship => &mut self.needs_sponsorship,
            FieldName::AdditionalInfo => &mut self.additional_info,
            FieldName::Gender => &mut self.gender,
            FieldName::Race => &mut self.race,
            FieldName::VeteranStatus => &mut self.veteran_status,
        };
        Some(slot)
    }
}

/// Errors raised while editing a form session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected} value, got {found}")]
    TypeMismatch {
        field: FieldName,
        expected: FieldKind,
        found: FieldKind,
    },
    #[error("application already submitted")]
    AlreadySubmitted,
}
