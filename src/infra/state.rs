//! Global application state.
//!
//! Used for access to common resources such as the current greeting.

use crate::core::greeting::greeting_service::GreetingService;
use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;

use super::config::Config;

/// Global application state.
#[derive(Clone, FromRef)]
pub struct AppState {
    greeting: GreetingService,
    metrics: PrometheusHandle,
}

impl AppState {
    /// Constructs a new [`AppState`] with the configured greeting.
    pub fn new(config: &Config) -> Self {
        Self {
            greeting: GreetingService::new(config.app.greeting.clone()),
            metrics: super::metrics::init_metrics(),
        }
    }

    /// Returns the greeting service.
    pub fn greeting(&self) -> &GreetingService {
        &self.greeting
    }

    /// Returns the metrics handle.
    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }
}
