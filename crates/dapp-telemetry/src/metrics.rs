//! # Prometheus Metrics
//!
//! Counters and histograms for the mutation pipeline and the read model.
//!
//! ## Naming Convention
//!
//! `ld_<area>_<name>_<unit>`, e.g. `ld_mutations_confirmed_total`.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Process-wide metrics registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Mutations accepted by the coordinator, by action.
    pub static ref MUTATIONS_SUBMITTED: IntCounterVec = IntCounterVec::new(
        Opts::new("ld_mutations_submitted_total", "Mutations accepted for submission"),
        &["action"]
    ).expect("metric creation failed");

    /// Mutations refused before any work, by action and reason (busy, validation).
    pub static ref MUTATIONS_REFUSED: IntCounterVec = IntCounterVec::new(
        Opts::new("ld_mutations_refused_total", "Mutations refused before submission"),
        &["action", "reason"]
    ).expect("metric creation failed");

    /// Mutations confirmed by the ledger, by action.
    pub static ref MUTATIONS_CONFIRMED: IntCounterVec = IntCounterVec::new(
        Opts::new("ld_mutations_confirmed_total", "Mutations confirmed by the ledger"),
        &["action"]
    ).expect("metric creation failed");

    /// Mutations that ended in a failure state, by action and failure kind.
    pub static ref MUTATIONS_FAILED: IntCounterVec = IntCounterVec::new(
        Opts::new("ld_mutations_failed_total", "Mutations ending in failure"),
        &["action", "kind"]
    ).expect("metric creation failed");

    /// Seconds from submission to terminal state, by action.
    pub static ref MUTATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("ld_mutation_duration_seconds", "Mutation end-to-end duration")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["action"]
    ).expect("metric creation failed");

    // =========================================================================
    // READ MODEL
    // =========================================================================

    /// Read-model fetch failures, by view and kind (not_found, schema, transport).
    pub static ref RECONCILE_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("ld_reconcile_errors_total", "Read-model refresh failures"),
        &["view", "kind"]
    ).expect("metric creation failed");

    /// Seconds spent in one metrics scrape.
    pub static ref SCRAPE_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new("ld_metrics_scrape_seconds", "Time to encode metrics")
    ).expect("metric creation failed");
}

/// Proof that the collectors are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register every collector with [`REGISTRY`].
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(MUTATIONS_SUBMITTED.clone()),
        Box::new(MUTATIONS_REFUSED.clone()),
        Box::new(MUTATIONS_CONFIRMED.clone()),
        Box::new(MUTATIONS_FAILED.clone()),
        Box::new(MUTATION_DURATION.clone()),
        Box::new(RECONCILE_ERRORS.clone()),
        Box::new(SCRAPE_DURATION.clone()),
    ];

    for collector in collectors {
        match REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Render [`REGISTRY`] in the Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let _timer = SCRAPE_DURATION.start_timer();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_encode_includes_counters() {
        register_metrics().unwrap();
        MUTATIONS_CONFIRMED.with_label_values(&["cook"]).inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("ld_mutations_confirmed_total"));
    }
}
