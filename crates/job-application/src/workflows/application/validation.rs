use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FieldName, NO, YES};
use super::form::ApplicationFormState;

pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email.";
pub const PHONE_REQUIRED: &str = "Phone is required.";
pub const SELECT_YES_OR_NO: &str = "Please select Yes or No.";

/// Field-level messages from one validation pass. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, field: FieldName, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Check the required fields of `state`. Every rule runs; nothing short-circuits.
pub fn validate(state: &ApplicationFormState) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&state.full_name) {
        errors.insert(FieldName::FullName, FULL_NAME_REQUIRED);
    }

    if is_blank(&state.email) {
        errors.insert(FieldName::Email, EMAIL_REQUIRED);
    } else if !is_email_shaped(&state.email) {
        errors.insert(FieldName::Email, EMAIL_INVALID);
    }

    if is_blank(&state.phone) {
        errors.insert(FieldName::Phone, PHONE_REQUIRED);
    }

    let choices = [
        (
            FieldName::FourDayOfficeExpectation,
            &state.four_day_office_expectation,
        ),
        (FieldName::WorkAuthUs, &state.work_auth_us),
        (FieldName::NeedsSponsorship, &state.needs_sponsorship),
    ];
    for (field, value) in choices {
        if !is_yes_or_no(value) {
            errors.insert(field, SELECT_YES_OR_NO);
        }
    }

    errors
}

/// `local@domain.tld` shape: no whitespace, a single `@` with text on both sides, and a dot
/// inside the domain with text on both sides of it.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(is_browser_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

/// Whitespace as browsers define it for `String.prototype.trim` and the regex `\s` class.
/// Differs from `char::is_whitespace`: U+FEFF counts, U+0085 does not.
pub fn is_browser_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_blank(value: &str) -> bool {
    value.chars().all(is_browser_whitespace)
}

fn is_yes_or_no(value: &str) -> bool {
    value == YES || value == NO
}
