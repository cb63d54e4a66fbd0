pub mod client;
pub mod configuration;
pub mod domain;
pub mod email_client;
mod error;
pub mod metrics;
pub mod routes;
mod state;
pub mod telemetry;

use axum::{
    body::Body,
    response::{IntoResponse, Response},
    Router, Server,
};
use configuration::Settings;
use http::Request;
use routes::contact::{ContactError, DeliveryOutcome};
use state::AppState;
use std::{any::Any, net::TcpListener};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{Level, Span};

/// The contact service, bound to its listener but not serving yet.
#[derive(Debug)]
pub struct App {
    listener: TcpListener,
    port: u16,
    router: Router,
}

impl App {
    /// Bind the listener and prepare the router from `settings`.
    pub fn build(settings: Settings) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(settings.application().address())?;
        let port = listener.local_addr()?.port();
        let app_state = AppState::create(&settings)?;
        let router = Self::build_router(&app_state);

        Ok(Self {
            listener,
            port,
            router,
        })
    }

    /// The port the app is listening on. Useful when binding to port 0.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until the server fails.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        tracing::info!("Server running at {}", self.listener.local_addr()?);
        Server::from_tcp(self.listener)?
            .serve(self.router.into_make_service())
            .await?;
        Ok(())
    }

    /// Build the router for the application.
    fn build_router(app_state: &AppState) -> Router {
        routes::build_router(app_state).layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_request_span)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .propagate_x_request_id()
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
    }
}

/// Span for every request, tagged with the request id set by the outer layer.
fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// A panicking handler still answers with the normal JSON error body.
fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    let error = ContactError::InternalError(anyhow::anyhow!("A request handler panicked"));
    tracing::error!(error.cause_chain = ?error, "Recovered from a panic");
    DeliveryOutcome::from(error).into_response()
}
