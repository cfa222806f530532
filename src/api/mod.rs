//! The HTTP API.

use axum::{extract::State, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::infra::{metrics, state::AppState};

pub mod greeting;

/// Constructs the API routes.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(greeting::greeting_api::routes())
        .route("/metrics", get(serve_metrics))
        .with_state(state)
}

/// Renders metrics in the Prometheus text format.
async fn serve_metrics(State(handle): State<PrometheusHandle>) -> String {
    metrics::render(&handle)
}
