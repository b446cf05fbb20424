use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const SUCCESS_NOTICE: &str = "Message sent successfully!";

/// Contact form as submitted. Values are kept verbatim so a rejected form can
/// be shown again with what the visitor typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, rocket::FromForm)]
pub struct ContactForm {
    #[field(default = String::new())]
    #[serde(default)]
    pub name: String,
    #[field(default = String::new())]
    #[serde(default)]
    pub email: String,
    #[field(default = String::new())]
    #[serde(default)]
    pub message: String,
}

/// A form that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    InvalidEmail,
}

impl ValidationError {
    /// Text shown to the visitor.
    pub fn notice(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Please fill in all fields.",
            ValidationError::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notice())
    }
}

impl std::error::Error for ValidationError {}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Check a submission. Empty fields are reported before a bad email.
pub fn validate(form: &ContactForm) -> Result<ContactMessage, ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// Contact section state for one page render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactView {
    pub values: ContactForm,
    pub flash: Option<(FlashKind, String)>,
}

impl ContactView {
    /// Outcome of a submission: errors keep the entered values, success resets the form.
    pub fn from_result(form: ContactForm, result: &Result<ContactMessage, ValidationError>) -> Self {
        match result {
            Ok(_) => ContactView {
                values: ContactForm::default(),
                flash: Some((FlashKind::Success, SUCCESS_NOTICE.to_string())),
            },
            Err(e) => ContactView {
                values: form,
                flash: Some((FlashKind::Error, e.notice().to_string())),
            },
        }
    }
}
