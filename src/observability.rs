use std::net::SocketAddr;
use std::time::Duration;

use crate::engine::EngineError;
use crate::model::Booking;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total admission calls. Labels: op, status.
pub const ADMISSIONS_TOTAL: &str = "carpark_admissions_total";

/// Histogram: admission latency in seconds. Labels: op.
pub const ADMISSION_DURATION_SECONDS: &str = "carpark_admission_duration_seconds";

/// Histogram: attempts consumed per admission call. Labels: op.
pub const ADMISSION_ATTEMPTS: &str = "carpark_admission_attempts";

/// Counter: admissions rejected because one or more days were full.
pub const CAPACITY_REJECTIONS_TOTAL: &str = "carpark_capacity_rejections_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Counter: day-lock waits that exceeded the store timeout.
pub const LOCK_TIMEOUTS_TOTAL: &str = "carpark_lock_timeouts_total";

/// Gauge: bookings currently in Active status.
pub const BOOKINGS_ACTIVE: &str = "carpark_bookings_active";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Install the default fmt tracing subscriber. Embedders that bring their own
/// subscriber skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}

/// Map an admission outcome to a short status label for metrics.
pub fn status_label(result: &Result<Booking, EngineError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(EngineError::Validation(_)) | Err(EngineError::LimitExceeded(_)) => "invalid",
        Err(EngineError::CapacityExceeded { .. }) => "capacity",
        Err(EngineError::NotFound(_)) => "not_found",
        Err(EngineError::Store(_)) => "store",
    }
}

/// Record the standard per-admission metrics in one place.
pub fn record_admission(
    op: &'static str,
    elapsed: Duration,
    attempts: u32,
    result: &Result<Booking, EngineError>,
) {
    metrics::counter!(ADMISSIONS_TOTAL, "op" => op, "status" => status_label(result)).increment(1);
    metrics::histogram!(ADMISSION_DURATION_SECONDS, "op" => op).record(elapsed.as_secs_f64());
    metrics::histogram!(ADMISSION_ATTEMPTS, "op" => op).record(f64::from(attempts));
}
