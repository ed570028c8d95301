use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static PHOTO_LIKES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("petstagram_photo_likes_total", "Total likes given to pet photos")
        .expect("register photo_likes_total")
});

pub static PROFILE_DELETIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("petstagram_profile_deletions_total", "Total profiles deleted with their pets and photos")
        .expect("register profile_deletions_total")
});

pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("petstagram_validation_failures_total", "Total form submissions rejected by validation")
        .expect("register validation_failures_total")
});

/// Touch every counter so `/metrics` lists them before the first event.
pub fn init() {
    Lazy::force(&PHOTO_LIKES_TOTAL);
    Lazy::force(&PROFILE_DELETIONS_TOTAL);
    Lazy::force(&VALIDATION_FAILURES_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
