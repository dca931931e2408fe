//! Metrics collection for observability

use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry, CounterVec, Histogram,
    Opts, Registry,
};
use std::sync::Arc;
use once_cell::sync::Lazy;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Outcome label for a served fact request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactOutcome {
    Served,
    Empty,
    StoreError,
}

impl FactOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactOutcome::Served => "served",
            FactOutcome::Empty => "empty",
            FactOutcome::StoreError => "store_error",
        }
    }
}

/// Outcome label for a text-generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success,
    NoText,
    Error,
}

impl GenerationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationOutcome::Success => "success",
            GenerationOutcome::NoText => "no_text",
            GenerationOutcome::Error => "error",
        }
    }
}

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    pub fact_requests: CounterVec,
    pub generation_requests: CounterVec,
    pub store_scan_duration: Histogram,
    pub generation_duration: Histogram,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let fact_requests = register_counter_vec_with_registry!(
            Opts::new("fact_requests_total", "Total fact requests by outcome"),
            &["outcome"],
            registry
        )?;

        let generation_requests = register_counter_vec_with_registry!(
            Opts::new("generation_requests_total", "Total text generation calls by outcome"),
            &["outcome"],
            registry
        )?;

        let store_scan_duration = register_histogram_with_registry!(
            "store_scan_duration_seconds",
            "Fact store scan duration in seconds",
            registry
        )?;

        let generation_duration = register_histogram_with_registry!(
            "generation_duration_seconds",
            "Text generation call duration in seconds",
            registry
        )?;

        Ok(Self {
            registry,
            fact_requests,
            generation_requests,
            store_scan_duration,
            generation_duration,
        })
    }

    /// Get the metrics registry for exporting
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_fact_request(&self, outcome: FactOutcome) {
        self.fact_requests.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_generation(&self, outcome: GenerationOutcome) {
        self.generation_requests.with_label_values(&[outcome.as_str()]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
