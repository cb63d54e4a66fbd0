use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::StatusCode;
use prometheus::{core::Collector, Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Counters describing how contact submissions end.
#[derive(Clone)]
pub struct SubmissionMetrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl std::fmt::Debug for SubmissionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionMetrics").finish_non_exhaustive()
    }
}

impl SubmissionMetrics {
    /// Create the metrics and register them in a fresh `Registry`.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Contact submissions handled, by response status",
            ),
            &["status"],
        )
        .context("Failed to create `contact_submissions_total` counter")?;
        registry
            .register(Box::new(submissions.clone()))
            .context("Failed to register `contact_submissions_total` metric")?;

        Ok(Self {
            registry,
            submissions,
        })
    }

    /// Count one submission answered with `status`.
    pub fn record(&self, status: StatusCode) {
        self.submissions.with_label_values(&[status.as_str()]).inc();
    }

    /// Current count for `status`, without creating a series for it.
    pub fn count(&self, status: StatusCode) -> u64 {
        self.submissions
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .find(|metric| {
                metric.get_label().iter().any(|label| {
                    label.get_name() == "status" && label.get_value() == status.as_str()
                })
            })
            .map_or(0, |metric| metric.get_counter().get_value() as u64)
    }

    fn encode(&self) -> Result<String, MetricsError> {
        let mut buffer = vec![];
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")
            .map_err(MetricsError::UnexpectedError)?;

        String::from_utf8(buffer)
            .context("Failed to convert metrics to a valid string")
            .map_err(MetricsError::UnexpectedError)
    }
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(metrics_endpoint))
}

/// Expose the submission counters in the Prometheus text format.
#[tracing::instrument(skip(metrics))]
#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = OK, description = "Prometheus metrics", body = String))
)]
pub async fn metrics_endpoint(
    State(metrics): State<Arc<SubmissionMetrics>>,
) -> Result<String, MetricsError> {
    metrics.encode()
}

#[derive(thiserror::Error)]
pub enum MetricsError {
    #[error("Unexpected error when generating metrics")]
    UnexpectedError(#[source] anyhow::Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        tracing::error!("{self:?}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
