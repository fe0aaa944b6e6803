//! Prometheus metrics for forum-service.
//!
//! Exposes mutation counters, request timings and the `/metrics` handler.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Forum mutations by resource (post/comment), action and outcome.
    pub static ref MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "forum_mutations_total",
        "Forum create/update/delete calls segmented by resource, action and outcome",
        &["resource", "action", "outcome"]
    )
    .expect("failed to register forum_mutations_total");

    /// HTTP request duration by method.
    pub static ref REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "forum_request_duration_seconds",
        "Forum HTTP request duration segmented by method",
        &["method"]
    )
    .expect("failed to register forum_request_duration_seconds");
}

/// Count one mutation attempt; the outcome label is derived from the
/// response status the error would produce.
pub fn record_mutation<T>(resource: &str, action: &str, result: &actix_web::Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => outcome_label(err.as_response_error().status_code()),
    };

    MUTATIONS_TOTAL
        .with_label_values(&[resource, action, outcome])
        .inc();
}

fn outcome_label(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => "invalid",
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::FORBIDDEN => "forbidden",
        _ => "error",
    }
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
