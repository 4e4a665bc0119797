use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "diagnosis_requests_total",
        "Total number of diagnosis calculations"
    );
    describe_counter!(
        "diagnosis_unpriced_lines_total",
        "Selected services that found no catalog price"
    );
    describe_counter!(
        "comparison_requests_total",
        "Total number of feature-comparison generations"
    );
    describe_counter!(
        "results_saved_total",
        "Total number of diagnosis results persisted"
    );
    describe_counter!(
        "email_notifications_total",
        "Total number of email webhook notifications"
    );
    describe_histogram!(
        "upstream_request_duration_seconds",
        "Outbound call duration in seconds"
    );
    describe_gauge!(
        "cost_diagnosis_info",
        "Service version and build information"
    );

    gauge!("cost_diagnosis_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a completed diagnosis calculation
pub fn record_diagnosis(selected_lines: usize, unpriced_lines: usize) {
    counter!(
        "diagnosis_requests_total",
        "selected" => selected_lines.to_string(),
    )
    .increment(1);

    if unpriced_lines > 0 {
        counter!("diagnosis_unpriced_lines_total").increment(unpriced_lines as u64);
    }
}

/// Record a comparison-generation attempt
pub fn record_comparison(outcome: &'static str) {
    counter!("comparison_requests_total", "outcome" => outcome).increment(1);
}

/// Record a persisted result
pub fn record_result_saved() {
    counter!("results_saved_total").increment(1);
}

/// Record an email notification attempt
pub fn record_email(outcome: &'static str) {
    counter!("email_notifications_total", "outcome" => outcome).increment(1);
}

/// Record the duration of an outbound call
pub fn record_upstream_duration(target: &'static str, duration: Duration) {
    histogram!(
        "upstream_request_duration_seconds",
        "target" => target,
    )
    .record(duration.as_secs_f64());
}
