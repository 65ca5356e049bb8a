//! Prometheus exporter for the `metrics` facade.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;

/// Install the global recorder and return the handle that renders `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, AppError> {
    PrometheusBuilder::new().install_recorder().map_err(|e| {
        tracing::error!("Failed to install Prometheus recorder: {}", e);
        AppError::InternalError(e.into())
    })
}

/// A handle backed by a recorder that is not installed globally.
///
/// Renders an empty exposition; used when a router is built without `main`.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
