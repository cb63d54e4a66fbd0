use crate::utils::{spawn_app, spawn_app_with};
use hyper::StatusCode;
use landing_contact::configuration::ContactSettings;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.health_check().await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.health_check().await;

    // Assert
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn status_reports_complete_delivery_settings() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let status: serde_json::Value = app
        .api_client()
        .get(app.at_url("/health/status"))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("Status was not JSON");

    // Assert
    assert_eq!(status, serde_json::json!({ "delivery_configured": true }));
}

#[tokio::test]
async fn status_reports_missing_delivery_settings() {
    // Arrange
    let app = spawn_app_with(ContactSettings::default()).await;

    // Act
    let status: serde_json::Value = app
        .api_client()
        .get(app.at_url("/health/status"))
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("Status was not JSON");

    // Assert
    assert_eq!(status, serde_json::json!({ "delivery_configured": false }));
}
