use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

use crate::error::HydrationError;

lazy_static! {
    pub static ref HYDRATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hydrations_total",
        "Total number of hydration attempts",
        &["entity", "status"]
    )
    .unwrap();

    pub static ref HYDRATION_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "hydration_failures_total",
        "Total number of failed hydrations by reason",
        &["reason"]
    )
    .unwrap();

    pub static ref ANSWER_DETAILS_KIND_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answer_details_kind_total",
        "Total number of hydrated answer details by variant",
        &["kind"]
    )
    .unwrap();

    pub static ref HYDRATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "hydration_duration_seconds",
        "Hydration duration in seconds",
        &["entity"],
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: time a hydration and count its outcome
pub fn track_hydration<F, T>(entity: &str, hydrate: F) -> Result<T, HydrationError>
where
    F: FnOnce() -> Result<T, HydrationError>,
{
    let start = std::time::Instant::now();
    let result = hydrate();
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    HYDRATIONS_TOTAL.with_label_values(&[entity, status]).inc();

    HYDRATION_DURATION_SECONDS
        .with_label_values(&[entity])
        .observe(duration);

    if let Err(err) = &result {
        HYDRATION_FAILURES_TOTAL
            .with_label_values(&[err.reason()])
            .inc();
    }

    result
}
