use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static SAVES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("user_store_saves_total", "Total users saved").expect("register saves_total")
});

pub static REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("user_store_rejected_total", "Total create requests rejected as invalid")
        .expect("register rejected_total")
});

pub static LOOKUPS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("user_store_lookups_total", "Total lookups by id").expect("register lookups_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("user_store_not_found_total", "Total lookups for unknown ids")
        .expect("register not_found_total")
});

/// Touch every counter so `/metrics` lists them before the first request.
pub fn init_metrics() {
    Lazy::force(&SAVES_TOTAL);
    Lazy::force(&REJECTED_TOTAL);
    Lazy::force(&LOOKUPS_TOTAL);
    Lazy::force(&NOT_FOUND_TOTAL);
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
