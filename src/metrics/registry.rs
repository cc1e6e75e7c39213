// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // GEMINI API METRICS
    // ============================================================================

    /// Total Gemini API calls
    pub static ref GEMINI_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("gemini_api_calls_total", "Total Gemini API calls"),
        &["model", "outcome"], // outcome: success, failure
        REGISTRY
    ).unwrap();

    /// Gemini API call duration
    pub static ref GEMINI_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("gemini_api_duration_seconds", "Gemini API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Total tokens processed
    pub static ref TOKENS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
        REGISTRY
    ).unwrap();

    // ============================================================================
    // RECIPE PIPELINE METRICS
    // ============================================================================

    /// Uploaded images by decode outcome
    pub static ref UPLOADED_IMAGES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("uploaded_images_total", "Uploaded images by decode outcome"),
        &["outcome"], // outcome: decoded, skipped
        REGISTRY
    ).unwrap();

    /// Parsed model replies by kind
    pub static ref MODEL_REPLIES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("model_replies_total", "Parsed model replies by kind"),
        &["kind"], // kind: recipe, raw, invalid_json
        REGISTRY
    ).unwrap();

    // ============================================================================
    // IMAGE RELAY METRICS
    // ============================================================================

    /// Image generation relay calls by upstream status
    pub static ref IMAGE_RELAY_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("image_relay_calls_total", "Image generation relay calls"),
        &["status_code"], // upstream status, or "transport_error"
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> prometheus::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Vec collectors only show up once a label set has been touched
        REQUESTS_TOTAL.with_label_values(&["GET", "/", "200"]).inc();
        GEMINI_API_CALLS.with_label_values(&["test-model", "success"]).inc();
        UPLOADED_IMAGES.with_label_values(&["decoded"]).inc();

        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("requests_total"));
        assert!(metrics.contains("gemini_api_calls_total"));
        assert!(metrics.contains("uploaded_images_total"));
    }
}
