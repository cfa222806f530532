//! Prometheus metrics.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, matched path and status
//! - `http_request_duration_seconds` (histogram): latency by the same labels
//! - `greeting_operations_total` (counter): greeting reads and updates by operation

use metrics::Label;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::{sync::OnceLock, time::Instant};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder on first use and returns a handle to it.
///
/// The recorder is process-wide, so every app shares the same handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!("Failed to install metrics recorder: {}", e);
            }
            handle
        })
        .clone()
}

/// Records a finished HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = vec![
        Label::new("method", method.to_string()),
        Label::new("path", path.to_string()),
        Label::new("status", status.to_string()),
    ];
    metrics::counter!("http_requests_total", labels.clone()).increment(1);
    metrics::histogram!("http_request_duration_seconds", labels)
        .record(start.elapsed().as_secs_f64());
}

/// Records a greeting operation such as `update`.
pub fn record_greeting_operation(operation: &'static str) {
    metrics::counter!("greeting_operations_total", "operation" => operation).increment(1);
}

/// Renders all metrics in the Prometheus text format.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.run_upkeep();
    handle.render()
}
