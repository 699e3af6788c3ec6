//! Static page layout: which sections exist, their order, and how each field is drawn.

use serde::Serialize;

use crate::workflows::application::domain::FieldName;
use crate::workflows::application::upload::RESUME_ACCEPT_ATTRIBUTE;

/// Marker appended to the label or legend of required inputs.
pub const REQUIRED_MARKER: &str = "✱";

/// Input widget used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Control {
    File { accept: &'static str },
    Text,
    Email,
    Tel,
    Url,
    TextArea { rows: u8 },
    Radio,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: FieldName,
    pub label: &'static str,
    pub control: Control,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    const fn new(field: FieldName, label: &'static str, control: Control) -> Self {
        Self {
            field,
            label,
            control,
            placeholder: None,
        }
    }

    const fn with_placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }
}

/// Explanatory paragraph under a section legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionHint {
    /// Office attendance paragraph; names the configured office location.
    OfficeExpectation,
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Columns {
    One,
    Two,
    Three,
}

impl Columns {
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Columns::One => None,
            Columns::Two => Some("grid two"),
            Columns::Three => Some("grid three"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub legend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<SectionHint>,
    pub columns: Columns,
    pub fields: &'static [FieldSpec],
}

impl SectionSpec {
    /// Yes/No sections carry the required marker on the legend rather than on a label.
    pub fn marks_legend(&self) -> bool {
        matches!(
            self.fields,
            [spec] if spec.control == Control::Radio && spec.field.is_required()
        )
    }
}

const RESUME_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    FieldName::Resume,
    "Resume/CV",
    Control::File {
        accept: RESUME_ACCEPT_ATTRIBUTE,
    },
)];

const BASIC_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new(FieldName::FullName, "Full name", Control::Text),
    FieldSpec::new(FieldName::Email, "Email", Control::Email),
    FieldSpec::new(FieldName::Phone, "Phone", Control::Tel),
    FieldSpec::new(FieldName::CurrentLocation, "Current location", Control::Text),
    FieldSpec::new(FieldName::CurrentCompany, "Current company", Control::Text),
];

const LINK_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new(FieldName::Linkedin, "LinkedIn URL", Control::Url)
        .with_placeholder("https://www.linkedin.com/in/username"),
    FieldSpec::new(FieldName::Twitter, "Twitter URL", Control::Url)
        .with_placeholder("https://twitter.com/username"),
    FieldSpec::new(FieldName::Github, "GitHub URL", Control::Url)
        .with_placeholder("https://github.com/username"),
    FieldSpec::new(FieldName::Portfolio, "Portfolio URL", Control::Url),
    FieldSpec::new(FieldName::OtherWebsite, "Other website", Control::Url),
];

const OFFICE_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    FieldName::FourDayOfficeExpectation,
    "4 Day In Office Expectation",
    Control::Radio,
)];

const WORK_AUTH_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    FieldName::WorkAuthUs,
    "Work Authorization",
    Control::Radio,
)];

const SPONSORSHIP_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    FieldName::NeedsSponsorship,
    "Visa Sponsorship",
    Control::Radio,
)];

const ADDITIONAL_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    FieldName::AdditionalInfo,
    "Additional information",
    Control::TextArea { rows: 5 },
)
.with_placeholder("Add a cover letter or anything else you want to share.")];

const EEO_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new(FieldName::Gender, "Gender", Control::Select),
    FieldSpec::new(FieldName::Race, "Race", Control::Select),
    FieldSpec::new(FieldName::VeteranStatus, "Veteran status", Control::Select),
];

/// Sections in on-page order.
pub static FORM_SECTIONS: [SectionSpec; 8] = [
    SectionSpec {
        legend: "Resume/CV (optional)",
        hint: None,
        columns: Columns::One,
        fields: &RESUME_FIELDS,
    },
    SectionSpec {
        legend: "Basic Information",
        hint: None,
        columns: Columns::Two,
        fields: &BASIC_FIELDS,
    },
    SectionSpec {
        legend: "Links",
        hint: None,
        columns: Columns::Two,
        fields: &LINK_FIELDS,
    },
    SectionSpec {
        legend: "4 Day In Office Expectation",
        hint: Some(SectionHint::OfficeExpectation),
        columns: Columns::One,
        fields: &OFFICE_FIELDS,
    },
    SectionSpec {
        legend: "Work Authorization",
        hint: None,
        columns: Columns::One,
        fields: &WORK_AUTH_FIELDS,
    },
    SectionSpec {
        legend: "Visa Sponsorship",
        hint: None,
        columns: Columns::One,
        fields: &SPONSORSHIP_FIELDS,
    },
    SectionSpec {
        legend: "Additional information",
        hint: None,
        columns: Columns::One,
        fields: &ADDITIONAL_FIELDS,
    },
    SectionSpec {
        legend: "U.S. Equal Employment Opportunity information (Voluntary)",
        hint: Some(SectionHint::Text(
            "Providing this information is optional. It will not be accessible or used in the hiring process.",
        )),
        columns: Columns::Three,
        fields: &EEO_FIELDS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_laid_out_exactly_once() {
        let laid_out: Vec<FieldName> = FORM_SECTIONS
            .iter()
            .flat_map(|section| section.fields.iter().map(|spec| spec.field))
            .collect();
        assert_eq!(laid_out, FieldName::ALL.to_vec());
    }

    #[test]
    fn only_yes_no_sections_mark_their_legend() {
        let marked: Vec<&str> = FORM_SECTIONS
            .iter()
            .filter(|section| section.marks_legend())
            .map(|section| section.legend)
            .collect();
        assert_eq!(
            marked,
            vec![
                "4 Day In Office Expectation",
                "Work Authorization",
                "Visa Sponsorship"
            ]
        );
    }

    #[test]
    fn choice_controls_back_fields_with_option_lists() {
        for spec in FORM_SECTIONS.iter().flat_map(|section| section.fields) {
            let has_options = !spec.field.options().is_empty();
            let is_choice_control = matches!(spec.control, Control::Radio | Control::Select);
            assert_eq!(has_options, is_choice_control, "{}", spec.field);
        }
    }
}
