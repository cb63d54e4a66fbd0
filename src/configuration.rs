use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Environment variables the hosting platform injects the delivery
/// credentials with. They take precedence over the configuration file.
const LEGACY_ENV_OVERRIDES: [(&str, &str); 3] = [
    ("contact.api_key", "RESEND_API_KEY"),
    ("contact.recipient", "CONTACT_TO_EMAIL"),
    ("contact.sender", "CONTACT_FROM_EMAIL"),
];

/// Retrieve the configuration for the application.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    for (key, variable) in LEGACY_ENV_OVERRIDES {
        builder = builder.set_override_option(key, std::env::var(variable).ok())?;
    }

    builder.build()?.try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
}

impl EmailClientSettings {
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}

/// Delivery credentials for contact submissions.
///
/// Every value is optional when loading, as a missing value is reported for
/// each submission instead of preventing the server from starting.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ContactSettings {
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

/// The complete set of values needed to deliver a contact submission.
#[derive(Debug)]
pub struct DeliverySettings<'a> {
    pub api_key: &'a Secret<String>,
    pub recipient: &'a str,
    pub sender: &'a str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("The `{0}` setting is missing or empty")]
pub struct MissingSetting(pub &'static str);

impl ContactSettings {
    /// Resolve the delivery settings, failing on the first value that is
    /// absent or empty.
    pub fn delivery(&self) -> Result<DeliverySettings<'_>, MissingSetting> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(MissingSetting("contact.api_key"))?;
        let recipient = non_empty(&self.recipient).ok_or(MissingSetting("contact.recipient"))?;
        let sender = non_empty(&self.sender).ok_or(MissingSetting("contact.sender"))?;

        Ok(DeliverySettings {
            api_key,
            recipient,
            sender,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.delivery().is_ok()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
