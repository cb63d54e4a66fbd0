use crate::{
    configuration::{ContactSettings, MissingSetting},
    domain::{ContactNotification, ContactSubmission, InvalidSubmission, SubmissionPayload},
    email_client::{DeliveryError, EmailClient, SentEmail},
    metrics::SubmissionMetrics,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use http::{Method, StatusCode};
use std::sync::Arc;
use utoipa::ToSchema;

/// Largest request body accepted on the contact endpoint.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub const DELIVERED_MESSAGE: &str = "Thank you for your message. I will get back to you soon.";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed.";
const MISCONFIGURED_MESSAGE: &str = "Server misconfigured.";
const TOO_LARGE_MESSAGE: &str = "Message too large.";
const DELIVERY_FAILED_MESSAGE: &str = "Could not send the email at this time.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while processing the request.";

/// Create a router to serve endpoints.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", any(submit_contact))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Send a message to the site owner.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = SubmissionPayload,
    responses(
        (status = OK, description = "The message was delivered", body = DeliveredBody),
        (status = BAD_REQUEST, description = "Missing fields, invalid email or short message", body = ErrorBody),
        (status = METHOD_NOT_ALLOWED, description = "Only POST is accepted", body = ErrorBody),
        (status = PAYLOAD_TOO_LARGE, description = "The body exceeds 64 KiB", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Server misconfigured or internal fault", body = ErrorBody),
        (status = BAD_GATEWAY, description = "The email provider rejected the message", body = ErrorBody),
    )
)]
pub async fn submit_contact(
    State(settings): State<Arc<ContactSettings>>,
    State(email_client): State<Arc<EmailClient>>,
    State(metrics): State<Arc<SubmissionMetrics>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> DeliveryOutcome {
    let outcome = match body {
        Ok(body) => {
            let request = SubmissionRequest { method, body };
            handle_submission(request, &settings, &email_client).await
        }
        Err(rejection) => refuse_unreadable_body(method, rejection),
    };
    metrics.record(outcome.status_code());
    outcome
}

/// Answer a request whose body could not be buffered, usually because it is
/// over [`MAX_BODY_BYTES`].
fn refuse_unreadable_body(method: Method, rejection: BytesRejection) -> DeliveryOutcome {
    let error = if method == Method::POST {
        ContactError::UnreadableBody(rejection)
    } else {
        ContactError::MethodNotAllowed(method)
    };
    tracing::warn!(error.cause_chain = ?error, "Contact submission refused");
    error.into()
}

/// The parts of an HTTP request the handler looks at.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub method: Method,
    pub body: Bytes,
}

/// Handle one contact submission.
///
/// Every failure is turned into a [`DeliveryOutcome::Failed`] with a message
/// safe to show to the caller, while the full error is logged.
#[tracing::instrument(
    name = "Handle a contact submission",
    skip_all,
    fields(
        http.method = %request.method,
        contact_email = tracing::field::Empty,
        contact_name = tracing::field::Empty,
    )
)]
pub async fn handle_submission(
    request: SubmissionRequest,
    settings: &ContactSettings,
    email_client: &EmailClient,
) -> DeliveryOutcome {
    match deliver(request, settings, email_client).await {
        Ok(sent) => {
            tracing::info!(email_id = %sent.id, "Contact submission delivered");
            DeliveryOutcome::Delivered {
                message: DELIVERED_MESSAGE.to_string(),
                id: sent.id,
            }
        }
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::error!(error.cause_chain = ?e, "Contact submission failed");
            } else {
                tracing::warn!(error.cause_chain = ?e, "Contact submission refused");
            }
            e.into()
        }
    }
}

async fn deliver(
    request: SubmissionRequest,
    settings: &ContactSettings,
    email_client: &EmailClient,
) -> Result<SentEmail, ContactError> {
    if request.method != Method::POST {
        return Err(ContactError::MethodNotAllowed(request.method));
    }

    let payload: SubmissionPayload =
        serde_json::from_slice(&request.body).map_err(ContactError::MalformedBody)?;
    let submission = ContactSubmission::try_from(payload).map_err(ContactError::BadRequest)?;

    let span = tracing::Span::current();
    span.record("contact_email", &tracing::field::display(&submission.email));
    span.record("contact_name", &tracing::field::display(submission.name.as_ref()));

    let delivery = settings.delivery().map_err(ContactError::Misconfigured)?;
    let notification = ContactNotification::compose(&submission);

    email_client
        .send_email(&delivery, &notification)
        .await
        .map_err(|e| match e {
            DeliveryError::Rejected { .. } => ContactError::UpstreamDeliveryFailed(e),
            _ => ContactError::InternalError(anyhow::Error::new(e)),
        })
}

/// Normalized result of a submission, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { message: String, id: String },
    Failed { status_code: StatusCode, error: String },
}

impl DeliveryOutcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Delivered { .. } => StatusCode::OK,
            Self::Failed { status_code, .. } => *status_code,
        }
    }
}

impl IntoResponse for DeliveryOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Delivered { message, id } => {
                (StatusCode::OK, Json(DeliveredBody { message, id })).into_response()
            }
            Self::Failed { status_code, error } => {
                (status_code, Json(ErrorBody { error })).into_response()
            }
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct DeliveredBody {
    pub message: String,
    pub id: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Represent the different ways handling a contact submission can fail.
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("The {0} method is not allowed")]
    MethodNotAllowed(Method),
    #[error("The request body could not be read")]
    UnreadableBody(#[source] BytesRejection),
    #[error("The request body is not a valid submission")]
    MalformedBody(#[source] serde_json::Error),
    #[error("The submission was refused")]
    BadRequest(#[source] InvalidSubmission),
    #[error("Delivery settings are incomplete")]
    Misconfigured(#[source] MissingSetting),
    #[error("The email provider did not accept the submission")]
    UpstreamDeliveryFailed(#[source] DeliveryError),
    #[error("Unexpected error while delivering the submission")]
    InternalError(#[source] anyhow::Error),
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnreadableBody(rejection) if is_too_large(rejection) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::UnreadableBody(_) | Self::MalformedBody(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Misconfigured(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamDeliveryFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message returned to the caller. Details of upstream and internal
    /// failures stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            Self::UnreadableBody(rejection) if is_too_large(rejection) => {
                TOO_LARGE_MESSAGE.to_string()
            }
            Self::UnreadableBody(_) | Self::MalformedBody(_) => {
                InvalidSubmission::MissingFields.to_string()
            }
            Self::BadRequest(reason) => reason.to_string(),
            Self::Misconfigured(_) => MISCONFIGURED_MESSAGE.to_string(),
            Self::UpstreamDeliveryFailed(_) => DELIVERY_FAILED_MESSAGE.to_string(),
            Self::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

fn is_too_large(rejection: &BytesRejection) -> bool {
    rejection.status() == StatusCode::PAYLOAD_TOO_LARGE
}

impl From<ContactError> for DeliveryOutcome {
    fn from(e: ContactError) -> Self {
        Self::Failed {
            status_code: e.status_code(),
            error: e.public_message(),
        }
    }
}
