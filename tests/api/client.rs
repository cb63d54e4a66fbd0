use crate::utils::{spawn_app, spawn_app_with, TestApp};
use landing_contact::{
    client::{AlertKind, Field, FormEvent, SubmissionController, SubmitOutcome, Validity},
    configuration::ContactSettings,
    routes::contact::DELIVERED_MESSAGE,
};
use pretty_assertions::assert_eq;
use reqwest::Url;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

fn controller_for(app: &TestApp) -> SubmissionController {
    let endpoint = Url::parse(&app.at_url("/contact")).expect("Invalid contact url");
    SubmissionController::new(endpoint)
}

fn fill_in(controller: &SubmissionController) {
    controller.dispatch(FormEvent::Input(Field::Name, "Ana Lima".into()));
    controller.dispatch(FormEvent::Input(Field::Email, "ana@x.com".into()));
    controller.dispatch(FormEvent::Input(Field::Phone, "12345678901".into()));
    controller.dispatch(FormEvent::Blur(Field::Phone));
    controller.dispatch(FormEvent::Input(
        Field::Message,
        "I would like to talk about a project.".into(),
    ));
}

#[tokio::test]
async fn a_delivered_submission_resets_the_form() {
    // Arrange
    let app = spawn_app().await;
    app.mock_send_email_endpoint_to_ok("email-42").await;
    let controller = controller_for(&app);
    fill_in(&controller);
    assert_eq!(
        controller.form().field(Field::Phone).value,
        "123 456 7890 1"
    );

    // Act
    let outcome = controller.submit().await;

    // Assert
    assert_eq!(
        outcome,
        SubmitOutcome::Delivered {
            message: DELIVERED_MESSAGE.into(),
            id: "email-42".into()
        }
    );
    let form = controller.form();
    for field in Field::ALL {
        assert_eq!(form.field(field).value, "");
        assert_eq!(form.field(field).validity, Validity::Unmarked);
    }
    let alert = form.alert().expect("No alert was shown");
    assert_eq!(alert.kind, AlertKind::Success);
    assert_eq!(alert.message, DELIVERED_MESSAGE);
}

#[tokio::test]
async fn a_second_submit_while_one_is_pending_is_ignored() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "email-1" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(app.email_server())
        .await;
    let controller = controller_for(&app);
    fill_in(&controller);

    // Act
    let (first, second) = tokio::join!(controller.submit(), controller.submit());

    // Assert
    assert!(matches!(first, SubmitOutcome::Delivered { .. }));
    assert_eq!(second, SubmitOutcome::Ignored);
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn a_misconfigured_server_is_reported_in_a_danger_alert() {
    // Arrange
    let app = spawn_app_with(ContactSettings::default()).await;
    let controller = controller_for(&app);
    fill_in(&controller);

    // Act
    let outcome = controller.submit().await;

    // Assert
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Server misconfigured.".into()
        }
    );
    let form = controller.form();
    let alert = form.alert().expect("No alert was shown");
    assert_eq!(alert.kind, AlertKind::Danger);
    assert_eq!(form.field(Field::Name).value, "Ana Lima");
    assert!(form.submit_enabled());
}
