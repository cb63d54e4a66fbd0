use super::form::{AlertKind, ContactForm, FormEvent, INVALID_FORM_MESSAGE};
use crate::{
    domain::{SubmissionPayload, ValidationResult},
    routes::contact::{DeliveredBody, ErrorBody},
};
use http::StatusCode;
use reqwest::{Client, Url};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

/// Shown when the server gave no usable explanation for a failure.
pub const FALLBACK_ERROR_MESSAGE: &str = "Your message could not be sent. Please try again later.";

/// Drives one contact form: keeps its state, and sends at most one
/// submission at a time to the contact endpoint.
#[derive(Debug)]
pub struct SubmissionController {
    endpoint: Url,
    http_client: Client,
    form: Mutex<ContactForm>,
    in_flight: AtomicBool,
}

/// How a call to [`SubmissionController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was still pending, nothing was sent.
    Ignored,
    /// The form did not pass its own checks, nothing was sent.
    Invalid(ValidationResult),
    Delivered { message: String, id: String },
    Failed { message: String },
}

/// Why a sent submission did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Failed to reach the contact endpoint")]
    Network(#[source] reqwest::Error),
    #[error("The contact endpoint answered {status}")]
    Rejected {
        status: StatusCode,
        error: Option<String>,
    },
    #[error("The response of the contact endpoint could not be read")]
    UnreadableResponse(#[source] reqwest::Error),
}

impl SubmitError {
    /// Text for the danger alert: the server's own explanation when it gave
    /// one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                error: Some(error), ..
            } if !error.trim().is_empty() => error.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Proof that a submission is in flight. Dropping it ends the submission,
/// whichever way the submitting code exits.
#[must_use]
#[derive(Debug)]
pub struct SubmitGuard<'a> {
    controller: &'a SubmissionController,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.controller.end_submit();
    }
}

impl SubmissionController {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            http_client: Client::new(),
            form: Mutex::new(ContactForm::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A snapshot of the form.
    pub fn form(&self) -> ContactForm {
        self.lock_form().clone()
    }

    pub fn dispatch(&self, event: FormEvent) {
        self.lock_form().apply(event);
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start a submission, unless one is already pending.
    pub fn begin_submit(&self) -> Option<SubmitGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard { controller: self })
    }

    fn end_submit(&self) {
        self.lock_form().finish_loading();
        self.in_flight.store(false, Ordering::Release);
    }

    /// Validate the form and send it.
    #[tracing::instrument(name = "Submit the contact form", skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = self.begin_submit() else {
            tracing::debug!("A submission is already pending");
            return SubmitOutcome::Ignored;
        };

        let payload = {
            let mut form = self.lock_form();
            form.clear_alert();
            let validation = form.validate();
            if !validation.is_valid() {
                form.mark_validated();
                form.show_alert(AlertKind::Warning, INVALID_FORM_MESSAGE);
                return SubmitOutcome::Invalid(validation);
            }
            form.start_loading();
            form.payload()
        };

        let result = self.send(&payload).await;

        let mut form = self.lock_form();
        match result {
            Ok(delivered) => {
                form.reset();
                form.show_alert(AlertKind::Success, delivered.message.clone());
                SubmitOutcome::Delivered {
                    message: delivered.message,
                    id: delivered.id,
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Contact submission failed");
                let message = e.user_message();
                form.show_alert(AlertKind::Danger, message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }

    async fn send(&self, payload: &SubmissionPayload) -> Result<DeliveredBody, SubmitError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(SubmitError::Network)?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<DeliveredBody>()
                .await
                .map_err(SubmitError::UnreadableResponse)
        } else {
            let error = response.json::<ErrorBody>().await.ok().map(|body| body.error);
            Err(SubmitError::Rejected { status, error })
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
