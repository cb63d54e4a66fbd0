use crate::{
    configuration::{ContactSettings, Settings},
    email_client::EmailClient,
    metrics::SubmissionMetrics,
};
use axum::extract::FromRef;
use derive_getters::Getters;
use duplicate::duplicate_item;
use std::sync::Arc;

#[derive(Debug, Clone, Getters)]
pub struct AppState {
    contact_settings: Arc<ContactSettings>,
    email_client: Arc<EmailClient>,
    metrics: Arc<SubmissionMetrics>,
}

impl AppState {
    pub fn create(settings: &Settings) -> anyhow::Result<Self> {
        let email_client =
            EmailClient::try_from(settings.email_client()).map_err(anyhow::Error::msg)?;

        Ok(Self {
            contact_settings: Arc::new(settings.contact().clone()),
            email_client: Arc::new(email_client),
            metrics: Arc::new(SubmissionMetrics::new()?),
        })
    }
}

#[duplicate_item(
    service_type            field;
    [ ContactSettings ]     [ contact_settings ];
    [ EmailClient ]         [ email_client ];
    [ SubmissionMetrics ]   [ metrics ];
)]
impl FromRef<AppState> for Arc<service_type> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.field.clone()
    }
}
