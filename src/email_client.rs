//! Client for the transactional email API (Resend compatible) that delivers
//! contact submissions to the site owner.

use crate::{configuration::DeliverySettings, domain::ContactNotification};
use http::StatusCode;
use reqwest::{Client, Url};
use secrecy::ExposeSecret;

#[derive(Debug)]
pub struct EmailClient {
    base_url: Url,
    http_client: Client,
}

/// Acknowledgement of the provider for an accepted email.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SentEmail {
    pub id: String,
}

impl EmailClient {
    /// Create a new email client.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            http_client: Client::new(),
        }
    }

    /// Send `notification` once. There is no retry: a rejected email is
    /// reported straight back to the caller.
    #[tracing::instrument(
        name = "Send contact notification",
        skip(self, delivery, notification),
        fields(email_id = tracing::field::Empty)
    )]
    pub async fn send_email(
        &self,
        delivery: &DeliverySettings<'_>,
        notification: &ContactNotification,
    ) -> Result<SentEmail, DeliveryError> {
        let url = self
            .base_url
            .join("emails")
            .map_err(DeliveryError::InvalidUrl)?;
        let request_body = SendEmailRequest {
            from: delivery.sender,
            to: [delivery.recipient],
            subject: &notification.subject,
            reply_to: notification.reply_to.as_ref(),
            html: &notification.html_body,
        };

        let response = self
            .http_client
            .post(url)
            .bearer_auth(delivery.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected { status, body });
        }

        let sent = response
            .json::<SentEmail>()
            .await
            .map_err(DeliveryError::InvalidResponse)?;
        tracing::Span::current().record("email_id", &tracing::field::display(&sent.id));

        Ok(sent)
    }
}

impl TryFrom<&crate::configuration::EmailClientSettings> for EmailClient {
    type Error = String;

    fn try_from(config: &crate::configuration::EmailClientSettings) -> Result<Self, Self::Error> {
        Ok(Self::new(config.base_url().map_err(|e| {
            tracing::error!("Unable to parse email client's base url: {e}");
            "Email base url is invalid".to_string()
        })?))
    }
}

#[derive(Debug, serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    reply_to: &'a str,
    html: &'a str,
}

/// Ways delivering a notification can fail.
#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error("The email endpoint could not be built from the base url")]
    InvalidUrl(#[source] url::ParseError),
    #[error("Failed to reach the email provider")]
    Transport(#[source] reqwest::Error),
    #[error("The email provider rejected the email with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("The email provider accepted the email but its response could not be read")]
    InvalidResponse(#[source] reqwest::Error),
}
