use crate::utils::{spawn_app, valid_body};
use axum::http::StatusCode;

#[tokio::test]
async fn submissions_are_counted_by_status() {
    // Arrange
    let app = spawn_app().await;
    app.mock_send_email_endpoint_to_ok("email-1").await;
    app.post_contact(&valid_body()).await;
    app.post_contact(&serde_json::json!({ "name": "Ana" })).await;

    // Act
    let response = app
        .api_client()
        .get(app.at_url("/metrics"))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let metrics = response.text().await.unwrap();
    assert!(metrics.contains(r#"contact_submissions_total{status="200"} 1"#));
    assert!(metrics.contains(r#"contact_submissions_total{status="400"} 1"#));
}

#[tokio::test]
async fn oversized_submissions_are_counted() {
    // Arrange
    let app = spawn_app().await;
    app.post_contact(&serde_json::json!({ "message": "a".repeat(70 * 1024) }))
        .await;

    // Act
    let metrics = app
        .api_client()
        .get(app.at_url("/metrics"))
        .send()
        .await
        .expect("Failed to execute request.")
        .text()
        .await
        .unwrap();

    // Assert
    assert!(metrics.contains(r#"contact_submissions_total{status="413"} 1"#));
}
