use axum::{http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once per process.
/// Later calls are no-ops so tests and subcommands can call it freely.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            // Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
            .set_buckets_for_metric(
                Matcher::Full("http_request_duration_seconds".to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ],
            )
            .expect("failed to set buckets for http_request_duration_seconds")
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    match METRICS_HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize report metrics to zero so they always appear in Prometheus
/// queries even before the first request
pub fn initialize_stats_metrics() {
    metrics::counter!("stats.api.materials.requests_total").absolute(0);
    metrics::counter!("stats.api.operators.requests_total").absolute(0);
    metrics::counter!("stats.api.news.requests_total").absolute(0);
    metrics::counter!("stats.api.errors_total").absolute(0);
    metrics::counter!("stats.cache.hit").absolute(0);
    metrics::counter!("stats.cache.miss").absolute(0);
}

/// Background task updating the process uptime gauge every 5 seconds
pub async fn process_metrics_task() {
    let start_time = Instant::now();

    loop {
        metrics::gauge!("process.uptime.seconds").set(start_time.elapsed().as_secs() as f64);
        metrics::gauge!("process.is_up").set(1.0);

        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}
