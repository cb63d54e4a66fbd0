//! The browser side of the contact pipeline, modelled as plain state: form
//! fields, validity markers, alert and submit control, plus a controller that
//! sends the form to the contact endpoint.

mod controller;
pub mod form;

pub use controller::{
    SubmissionController, SubmitError, SubmitGuard, SubmitOutcome, FALLBACK_ERROR_MESSAGE,
};
pub use form::{Alert, AlertKind, ContactForm, Field, FieldState, FormEvent, Validity};
