//! State of the contact form as the person sees it, and the event handlers
//! that update it.
//!
//! Each handler is a plain function taking the field state it changes, so it
//! can be exercised without a controller or a network.

use crate::domain::{
    phone_number::{self, PhoneCheck, MIN_PHONE_DIGITS},
    ContactEmail, ContactMessage, ContactName, SubmissionPayload, ValidationResult,
    MIN_MESSAGE_LENGTH, MIN_NAME_LENGTH,
};

pub const INVALID_FORM_MESSAGE: &str = "Please fix the highlighted fields before sending.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    /// Fields in the order they appear on the form.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];
}

/// Validity marker shown next to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unmarked,
    Valid,
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub validity: Validity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Something the person did on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Input(Field, String),
    Focus(Field),
    Blur(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    name: FieldState,
    email: FieldState,
    phone: FieldState,
    message: FieldState,
    was_validated: bool,
    alert: Option<Alert>,
    submit_enabled: bool,
    loading: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: FieldState::default(),
            email: FieldState::default(),
            phone: FieldState::default(),
            message: FieldState::default(),
            was_validated: false,
            alert: None,
            submit_enabled: true,
            loading: false,
        }
    }
}

impl ContactForm {
    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn was_validated(&self) -> bool {
        self.was_validated
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Route `event` to its handler.
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Input(Field::Phone, raw) => on_phone_input(&mut self.phone, &raw),
            FormEvent::Input(field, value) => self.field_mut(field).value = value,
            FormEvent::Focus(Field::Phone) => on_phone_focus(&mut self.phone),
            FormEvent::Blur(Field::Phone) => on_phone_blur(&mut self.phone),
            FormEvent::Focus(_) | FormEvent::Blur(_) => {}
        }
    }

    /// The first problem with `field`, if any.
    pub fn field_error(&self, field: Field) -> Option<String> {
        let value = self.field(field).value.trim();
        match field {
            Field::Name if value.is_empty() => Some("Name is required".to_string()),
            Field::Name if !ContactName::is_long_enough(value) => Some(format!(
                "Name must be at least {MIN_NAME_LENGTH} characters"
            )),
            Field::Email if value.is_empty() => Some("Email is required".to_string()),
            Field::Email if !ContactEmail::is_valid(value) => {
                Some("Email is not valid".to_string())
            }
            Field::Phone if phone_number::check(value) == PhoneCheck::TooShort => {
                Some(phone_too_short())
            }
            Field::Message if value.is_empty() => Some("Message is required".to_string()),
            Field::Message if !ContactMessage::is_long_enough(value) => Some(format!(
                "Message must be at least {MIN_MESSAGE_LENGTH} characters"
            )),
            _ => None,
        }
    }

    /// Check every field, in form order.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        for error in Field::ALL.iter().filter_map(|&field| self.field_error(field)) {
            result.push(error);
        }
        result
    }

    /// Flag the form as validated and mark every field with its outcome.
    pub fn mark_validated(&mut self) {
        self.was_validated = true;
        for field in Field::ALL {
            let validity = match self.field_error(field) {
                Some(error) => Validity::Invalid(error),
                None => Validity::Valid,
            };
            self.field_mut(field).validity = validity;
        }
    }

    /// Build what gets sent: trimmed values, phone reduced to its digits.
    pub fn payload(&self) -> SubmissionPayload {
        let phone = phone_number::digits(&self.phone.value);
        SubmissionPayload {
            name: self.name.value.trim().to_string(),
            email: self.email.value.trim().to_string(),
            phone: (!phone.is_empty()).then_some(phone),
            message: self.message.value.trim().to_string(),
        }
    }

    pub fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            message: message.into(),
        });
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }

    /// Disable the submit control and show the loading indicator.
    pub fn start_loading(&mut self) {
        self.submit_enabled = false;
        self.loading = true;
    }

    pub fn finish_loading(&mut self) {
        self.submit_enabled = true;
        self.loading = false;
    }

    /// Empty every field and drop all validity markers.
    pub fn reset(&mut self) {
        for field in Field::ALL {
            *self.field_mut(field) = FieldState::default();
        }
        self.was_validated = false;
    }
}

fn phone_too_short() -> String {
    format!("Phone must have at least {MIN_PHONE_DIGITS} digits")
}

/// Keep the phone field formatted while the person types.
pub fn on_phone_input(phone: &mut FieldState, raw: &str) {
    phone.value = phone_number::format_grouped(raw);
}

/// Mark the phone field once the person leaves it. An empty field stays
/// unmarked as the phone is optional.
pub fn on_phone_blur(phone: &mut FieldState) {
    match phone_number::check(&phone.value) {
        PhoneCheck::Empty => {}
        PhoneCheck::TooShort => phone.validity = Validity::Invalid(phone_too_short()),
        PhoneCheck::Valid => phone.validity = Validity::Valid,
    }
}

/// Coming back to the phone field starts over.
pub fn on_phone_focus(phone: &mut FieldState) {
    phone.validity = Validity::Unmarked;
}
