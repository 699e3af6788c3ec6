use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::form::FormError;

/// Identifier wrapper for an in-memory form session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every field the application form collects, in on-page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Resume,
    FullName,
    Email,
    Phone,
    CurrentLocation,
    CurrentCompany,
    Linkedin,
    Twitter,
    Github,
    Portfolio,
    OtherWebsite,
    FourDayOfficeExpectation,
    WorkAuthUs,
    NeedsSponsorship,
    AdditionalInfo,
    Gender,
    Race,
    VeteranStatus,
}

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Choice,
    File,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Choice => "choice",
            FieldKind::File => "file",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FieldName {
    pub const ALL: [FieldName; 18] = [
        FieldName::Resume,
        FieldName::FullName,
        FieldName::Email,
        FieldName::Phone,
        FieldName::CurrentLocation,
        FieldName::CurrentCompany,
        FieldName::Linkedin,
        FieldName::Twitter,
        FieldName::Github,
        FieldName::Portfolio,
        FieldName::OtherWebsite,
        FieldName::FourDayOfficeExpectation,
        FieldName::WorkAuthUs,
        FieldName::NeedsSponsorship,
        FieldName::AdditionalInfo,
        FieldName::Gender,
        FieldName::Race,
        FieldName::VeteranStatus,
    ];

    /// Wire identifier used in form posts, JSON payloads, and HTML ids.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldName::Resume => "resume",
            FieldName::FullName => "fullName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::CurrentLocation => "currentLocation",
            FieldName::CurrentCompany => "currentCompany",
            FieldName::Linkedin => "linkedin",
            FieldName::Twitter => "twitter",
            FieldName::Github => "github",
            FieldName::Portfolio => "portfolio",
            FieldName::OtherWebsite => "otherWebsite",
            FieldName::FourDayOfficeExpectation => "fourDayOfficeExpectation",
            FieldName::WorkAuthUs => "workAuthUs",
            FieldName::NeedsSponsorship => "needsSponsorship",
            FieldName::AdditionalInfo => "additionalInfo",
            FieldName::Gender => "gender",
            FieldName::Race => "race",
            FieldName::VeteranStatus => "veteranStatus",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            FieldName::Resume => FieldKind::File,
            FieldName::FourDayOfficeExpectation
            | FieldName::WorkAuthUs
            | FieldName::NeedsSponsorship
            | FieldName::Gender
            | FieldName::Race
            | FieldName::VeteranStatus => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    /// Whether a missing or malformed value blocks submission.
    pub const fn is_required(self) -> bool {
        matches!(
            self,
            FieldName::FullName
                | FieldName::Email
                | FieldName::Phone
                | FieldName::FourDayOfficeExpectation
                | FieldName::WorkAuthUs
                | FieldName::NeedsSponsorship
        )
    }

    /// Fixed option list for choice fields; empty for everything else.
    pub const fn options(self) -> &'static [ChoiceOption] {
        match self {
            FieldName::FourDayOfficeExpectation
            | FieldName::WorkAuthUs
            | FieldName::NeedsSponsorship => &YES_NO_OPTIONS,
            FieldName::Gender => &GENDER_OPTIONS,
            FieldName::Race => &RACE_OPTIONS,
            FieldName::VeteranStatus => &VETERAN_STATUS_OPTIONS,
            _ => &[],
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| FormError::UnknownField(value.to_string()))
    }
}

/// A stored option value and the label shown for it. The two only differ for veteran status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl ChoiceOption {
    const fn plain(value: &'static str) -> Self {
        Self {
            value,
            label: value,
        }
    }
}

pub const YES: &str = "Yes";
pub const NO: &str = "No";

pub const YES_NO_OPTIONS: [ChoiceOption; 2] = [ChoiceOption::plain(YES), ChoiceOption::plain(NO)];

pub const GENDER_OPTIONS: [ChoiceOption; 4] = [
    ChoiceOption::plain("Female"),
    ChoiceOption::plain("Male"),
    ChoiceOption::plain("Non-binary"),
    ChoiceOption::plain("Prefer not to say"),
];

pub const RACE_OPTIONS: [ChoiceOption; 8] = [
    ChoiceOption::plain("American Indian or Alaska Native"),
    ChoiceOption::plain("Asian"),
    ChoiceOption::plain("Black or African American"),
    ChoiceOption::plain("Hispanic or Latino"),
    ChoiceOption::plain("Native Hawaiian or Other Pacific Islander"),
    ChoiceOption::plain("White"),
    ChoiceOption::plain("Two or more races"),
    ChoiceOption::plain("Prefer not to say"),
];

pub const VETERAN_STATUS_OPTIONS: [ChoiceOption; 3] = [
    ChoiceOption::plain("I am not a protected veteran"),
    ChoiceOption {
        value: "I identify as one or more of the classifications of a protected veteran",
        label: "I identify as a protected veteran",
    },
    ChoiceOption::plain("I don't wish to answer"),
];

/// Metadata for a selected resume. File contents never reach the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Value handed to `set_field`: text for text/choice fields, an optional file for the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Resume(Option<ResumeFile>),
}

impl FieldValue {
    pub const fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Resume(_) => FieldKind::File,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<ResumeFile> for FieldValue {
    fn from(value: ResumeFile) -> Self {
        FieldValue::Resume(Some(value))
    }
}

impl From<Option<ResumeFile>> for FieldValue {
    fn from(value: Option<ResumeFile>) -> Self {
        FieldValue::Resume(value)
    }
}

/// Session lifecycle. Only `InProgress -> Submitted` exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    InProgress,
    Submitted,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Submitted => "submitted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_wire_identifiers() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().expect("known"), field);
        }
        assert!(matches!(
            "coverLetter".parse::<FieldName>(),
            Err(FormError::UnknownField(name)) if name == "coverLetter"
        ));
    }

    #[test]
    fn serde_identifiers_match_wire_identifiers() {
        for field in FieldName::ALL {
            let encoded = serde_json::to_value(field).expect("serializes");
            assert_eq!(encoded, serde_json::Value::String(field.as_str().to_string()));
        }
    }

    #[test]
    fn veteran_status_keeps_stored_value_and_short_label_apart() {
        let protected = VETERAN_STATUS_OPTIONS[1];
        assert_eq!(
            protected.value,
            "I identify as one or more of the classifications of a protected veteran"
        );
        assert_eq!(protected.label, "I identify as a protected veteran");
        assert!(GENDER_OPTIONS.iter().all(|option| option.value == option.label));
    }

    #[test]
    fn untagged_values_decode_text_and_files() {
        let text: FieldValue = serde_json::from_str("\"Jane\"").expect("text");
        assert_eq!(text, FieldValue::Text("Jane".to_string()));

        let cleared: FieldValue = serde_json::from_str("null").expect("null");
        assert_eq!(cleared, FieldValue::Resume(None));

        let file: FieldValue =
            serde_json::from_str(r#"{"name":"cv.pdf","size_bytes":2048}"#).expect("file");
        assert_eq!(
            file,
            FieldValue::Resume(Some(ResumeFile {
                name: "cv.pdf".to_string(),
                size_bytes: 2048,
                content_type: None,
            }))
        );
    }

    #[test]
    fn required_fields_are_the_six_gated_inputs() {
        let required: Vec<_> = FieldName::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .collect();
        assert_eq!(
            required,
            vec![
                FieldName::FullName,
                FieldName::Email,
                FieldName::Phone,
                FieldName::FourDayOfficeExpectation,
                FieldName::WorkAuthUs,
                FieldName::NeedsSponsorship,
            ]
        );
    }
}
