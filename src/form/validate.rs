use crate::i18n::LanguageStrings;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Names of the controls the validator looks at.
pub const NAME_FIELD: &str = "name";
pub const PHONE_FIELD: &str = "phone";
pub const EMAIL_FIELD: &str = "email";
pub const COURSE_FIELD: &str = "course";
pub const MESSAGE_FIELD: &str = "message";

/// Raw values of the contact form as typed by the visitor.
///
/// `extra` holds every other control of the form (hidden inputs the form
/// service reads, such as `_subject` or a honeypot) in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
    pub message: String,
    pub extra: Vec<(String, String)>,
}

impl ContactFields {
    /// Build from the form's `(name, value)` entries. The first entry for a
    /// validated field wins; everything else is kept in `extra`.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut fields = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in entries {
            let slot = match key.as_str() {
                NAME_FIELD => Some(&mut fields.name),
                PHONE_FIELD => Some(&mut fields.phone),
                EMAIL_FIELD => Some(&mut fields.email),
                COURSE_FIELD => Some(&mut fields.course),
                MESSAGE_FIELD => Some(&mut fields.message),
                _ => None,
            };
            match slot {
                Some(slot) if !seen.contains(&key) => {
                    *slot = value;
                    seen.push(key);
                }
                _ => fields.extra.push((key, value)),
            }
        }

        fields
    }
}

/// A validated submission, ready to be sent. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
    pub message: String,
    pub extra: Vec<(String, String)>,
}

impl ContactSubmission {
    /// Every field as posted: the validated fields first, then the rest of
    /// the form in document order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let named = [
            (NAME_FIELD, self.name.as_str()),
            (PHONE_FIELD, self.phone.as_str()),
            (EMAIL_FIELD, self.email.as_str()),
            (COURSE_FIELD, self.course.as_str()),
            (MESSAGE_FIELD, self.message.as_str()),
        ];
        named
            .into_iter()
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }
}

/// Everything that can go wrong with a contact form submission.
///
/// All variants are recoverable: the visitor corrects the form and submits
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("required fields are missing")]
    MissingFields,

    #[error("phone number must have 9 or 10 digits")]
    InvalidPhone,

    #[error("email address is malformed")]
    InvalidEmail,

    /// Transport failure or a non-success acknowledgment; the two are not
    /// distinguished for the visitor.
    #[error("form submission failed: {0}")]
    Network(String),
}

impl FormError {
    /// Short machine-readable reason, used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            FormError::MissingFields => "missing_fields",
            FormError::InvalidPhone => "invalid_phone",
            FormError::InvalidEmail => "invalid_email",
            FormError::Network(_) => "network_failure",
        }
    }

    /// The notification text shown for this error.
    pub fn message<'a>(&self, strings: &'a LanguageStrings) -> &'a str {
        match self {
            FormError::MissingFields => strings.missing_fields,
            FormError::InvalidPhone => strings.invalid_phone,
            FormError::InvalidEmail => strings.invalid_email,
            FormError::Network(_) => strings.submit_failed,
        }
    }
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{9,10}$").expect("phone regex is valid"))
}

fn phone_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]").expect("separator regex is valid"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

/// Thai phone numbers: 9 or 10 digits once hyphens and whitespace are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(&phone_separators().replace_all(phone, ""))
}

/// Basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate the form in a fixed order: required fields, then phone, then
/// email (only when supplied). The first failing rule wins.
pub fn validate(fields: &ContactFields) -> Result<ContactSubmission, FormError> {
    if fields.name.is_empty() || fields.phone.is_empty() || fields.message.is_empty() {
        return Err(FormError::MissingFields);
    }

    if !is_valid_phone(&fields.phone) {
        return Err(FormError::InvalidPhone);
    }

    if !fields.email.is_empty() && !is_valid_email(&fields.email) {
        return Err(FormError::InvalidEmail);
    }

    Ok(ContactSubmission {
        name: fields.name.clone(),
        phone: fields.phone.clone(),
        email: fields.email.clone(),
        course: fields.course.clone(),
        message: fields.message.clone(),
        extra: fields.extra.clone(),
    })
}

/// Reformat a phone field while the visitor types: keep digits only and group
/// them as `081-234-5678`.
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Floating labels stay raised after blur only while the field has a value.
pub fn keeps_focus_class(value: &str) -> bool {
    !value.is_empty()
}
