use crate::{configuration::ContactSettings, state::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use utoipa::ToSchema;

/// Create a router to serve health checks.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(is_alive))
        .route("/status", get(status))
}

/// Simple `is_alive` endpoint that will always return a 200 OK.
/// Used to indicate when the webserver is up and running.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health",
    responses((status = OK, description = "Check if service is alive"))
)]
pub async fn is_alive() -> StatusCode {
    tracing::debug!("Service is alive");
    StatusCode::OK
}

#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct Status {
    delivery_configured: bool,
}

/// Status endpoint reporting whether submissions can currently be delivered.
#[tracing::instrument(skip(settings))]
#[utoipa::path(
    get,
    path = "/health/status",
    responses(
        (status = OK, description = "Whether every delivery setting is present", body = Status)
    )
)]
pub async fn status(State(settings): State<Arc<ContactSettings>>) -> Json<Status> {
    let status = Status {
        delivery_configured: settings.is_complete(),
    };
    if !status.delivery_configured {
        tracing::warn!("Contact delivery settings are incomplete");
    }
    tracing::info!("Status: {:?}", status);
    Json(status)
}
