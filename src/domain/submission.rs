use super::{ContactEmail, ContactMessage, ContactName};
use utoipa::ToSchema;

/// Fields of the contact form as sent over the wire.
///
/// Absent fields deserialize as empty strings so that they are reported as
/// missing instead of as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Digits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A submission that passed every check of the handler.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<String>,
    pub message: ContactMessage,
}

/// Reasons for the handler to refuse a submission. The display text is sent
/// back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSubmission {
    #[error("Missing required fields.")]
    MissingFields,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Message too short.")]
    MessageTooShort,
}

impl TryFrom<SubmissionPayload> for ContactSubmission {
    type Error = InvalidSubmission;

    fn try_from(value: SubmissionPayload) -> Result<Self, Self::Error> {
        let is_blank = |field: &str| field.trim().is_empty();
        if is_blank(&value.name) || is_blank(&value.email) || is_blank(&value.message) {
            return Err(InvalidSubmission::MissingFields);
        }

        let name = ContactName::parse(value.name).map_err(|_| InvalidSubmission::MissingFields)?;
        let email =
            ContactEmail::parse(value.email).map_err(|_| InvalidSubmission::InvalidEmail)?;
        let message =
            ContactMessage::parse(value.message).map_err(|_| InvalidSubmission::MessageTooShort)?;
        let phone = value
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());

        Ok(Self {
            name,
            email,
            phone,
            message,
        })
    }
}

/// Outcome of checking the form: every problem found, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
