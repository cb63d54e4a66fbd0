mod contact_email;
mod contact_message;
mod contact_name;
mod html;
mod notification;
pub mod phone_number;
mod submission;

pub use contact_email::ContactEmail;
pub use contact_message::{ContactMessage, MIN_MESSAGE_LENGTH};
pub use contact_name::{ContactName, MIN_NAME_LENGTH};
pub use html::escape_html;
pub use notification::ContactNotification;
pub use submission::{ContactSubmission, InvalidSubmission, SubmissionPayload, ValidationResult};
