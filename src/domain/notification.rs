use super::{escape_html, ContactEmail, ContactSubmission};

/// The email sent to the site owner for a contact submission.
#[derive(Debug, Clone)]
pub struct ContactNotification {
    pub subject: String,
    pub html_body: String,
    pub reply_to: ContactEmail,
}

impl ContactNotification {
    /// Compose the notification. Every user supplied value is escaped before
    /// it is placed in the HTML body.
    pub fn compose(submission: &ContactSubmission) -> Self {
        let name = escape_html(submission.name.as_ref());
        let email = escape_html(submission.email.as_ref());
        let message = escape_html(submission.message.as_ref()).replace('\n', "<br>");
        let phone = submission
            .phone
            .as_deref()
            .map(|phone| format!("<p><strong>Phone:</strong> {}</p>\n", escape_html(phone)))
            .unwrap_or_default();

        let html_body = format!(
            "<h2>New contact from the landing page</h2>\n\
             <p><strong>Name:</strong> {name}</p>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             {phone}\
             <p><strong>Message:</strong></p>\n\
             <p>{message}</p>\n"
        );

        Self {
            subject: format!("New message from {}", submission.name.as_ref()),
            html_body,
            reply_to: submission.email.clone(),
        }
    }
}
