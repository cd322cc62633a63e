use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all dashboard metrics
const PREFIX: &str = "media_sales";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Dashboard Metrics
    pub static ref DASHBOARD_EVENTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_dashboard_events_total"), "Control events applied, by input"),
        &["input"]
    ).expect("Failed to create dashboard_events_total metric");

    pub static ref DASHBOARD_RECOMPUTES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_dashboard_recomputes_total"), "Output recomputations"),
        &["output"]
    ).expect("Failed to create dashboard_recomputes_total metric");

    pub static ref DASHBOARD_RECOMPUTE_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_dashboard_recompute_duration_seconds"),
            "Output recomputation duration in seconds"
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        &["output"]
    ).expect("Failed to create dashboard_recompute_duration_seconds metric");

    // Dataset Metrics
    pub static ref DATASET_ROWS: Gauge = Gauge::new(
        format!("{PREFIX}_dataset_rows"),
        "Transaction records in the loaded dataset"
    ).expect("Failed to create dataset_rows metric");

    pub static ref DATASET_LOOKUP_ENTRIES: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_dataset_lookup_entries"), "Entries per key lookup table"),
        &["table"]
    ).expect("Failed to create dataset_lookup_entries metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DASHBOARD_EVENTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(DASHBOARD_RECOMPUTES_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(DASHBOARD_RECOMPUTE_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_ROWS.clone()));
    let _ = REGISTRY.register(Box::new(DATASET_LOOKUP_ENTRIES.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Initialize dataset size gauges
pub fn init_dataset_metrics(num_rows: usize, num_genres: usize, num_artists: usize) {
    DATASET_ROWS.set(num_rows as f64);

    DATASET_LOOKUP_ENTRIES
        .with_label_values(&["genre"])
        .set(num_genres as f64);

    DATASET_LOOKUP_ENTRIES
        .with_label_values(&["artist"])
        .set(num_artists as f64);

    tracing::info!(
        "Dataset metrics initialized: {} rows, {} genre keys, {} artist keys",
        num_rows,
        num_genres,
        num_artists
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

pub fn record_event(input: &str) {
    DASHBOARD_EVENTS_TOTAL.with_label_values(&[input]).inc();
}

/// Record one output recomputation
pub fn record_recompute(output: &str, duration: Duration) {
    DASHBOARD_RECOMPUTES_TOTAL
        .with_label_values(&[output])
        .inc();

    DASHBOARD_RECOMPUTE_DURATION_SECONDS
        .with_label_values(&[output])
        .observe(duration.as_secs_f64());
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            let rss_kb = status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<f64>().ok());
            if let Some(kb) = rss_kb {
                PROCESS_MEMORY_BYTES.set(kb * 1024.0);
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
