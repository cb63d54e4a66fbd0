use derive_getters::Getters;
use landing_contact::{
    configuration::{get_configuration, ContactSettings, Settings},
    telemetry::{get_subscriber, init_subscriber},
    App,
};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test".into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const TEST_API_KEY: &str = "re_test_key";
pub const TEST_RECIPIENT: &str = "owner@example.com";
pub const TEST_SENDER: &str = "site@example.com";

#[derive(Debug, Getters)]
pub struct TestApp {
    address: String,
    email_server: MockServer,
    api_client: reqwest::Client,
}

impl TestApp {
    pub fn at_url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(self.at_url("/contact"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn health_check(&self) -> reqwest::Response {
        self.api_client
            .get(self.at_url("/health"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Mount a provider endpoint that accepts every email with `id`.
    pub async fn mock_send_email_endpoint_to_ok(&self, id: &str) {
        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id })))
            .named("Accepting email provider")
            .mount(&self.email_server)
            .await;
    }
}

pub fn complete_contact_settings() -> ContactSettings {
    ContactSettings {
        api_key: Some(Secret::new(TEST_API_KEY.to_string())),
        recipient: Some(TEST_RECIPIENT.to_string()),
        sender: Some(TEST_SENDER.to_string()),
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ana",
        "email": "ana@x.com",
        "message": "Hello there, testing.",
    })
}

/// Spawn an instance of the app on a random port, with complete delivery
/// settings pointing at a mock email provider.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(complete_contact_settings()).await
}

/// Spawn an instance of the app with the given delivery settings.
pub async fn spawn_app_with(contact: ContactSettings) -> TestApp {
    Lazy::force(&TRACING);
    let email_server = MockServer::start().await;

    let config: Settings = {
        let mut c = get_configuration().expect("Failed to read configuration");

        // Make OS choose random port
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c.contact = contact;

        c
    };

    let app = App::build(config).expect("Failed to build application");
    let port = app.port();

    // Start server
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        email_server,
        api_client: reqwest::Client::new(),
    }
}
