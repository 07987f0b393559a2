//! Prometheus metrics registry for the energy mix service.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and hand it to
//! the router state.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{CounterVec, Histogram, HistogramOpts, Opts, Registry};

/// Content type of the Prometheus text exposition format.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Pipeline label for the daily mix summary.
pub const PIPELINE_ENERGY_MIX: &str = "energy_mix";
/// Pipeline label for the charging window search.
pub const PIPELINE_OPTIMAL_CHARGING: &str = "optimal_charging";

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// Pipeline executions (fetch + compute), labelled by pipeline.
    pub pipeline_runs_total: CounterVec,
    /// Failed pipeline executions, labelled by pipeline.
    pub pipeline_errors_total: CounterVec,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new(
                "energy_mix_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "energy_mix_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        let pipeline_runs_total = CounterVec::new(
            Opts::new(
                "energy_mix_pipeline_runs_total",
                "Fetch-and-compute pipeline executions",
            ),
            &["pipeline"],
        )?;

        let pipeline_errors_total = CounterVec::new(
            Opts::new(
                "energy_mix_pipeline_errors_total",
                "Failed fetch-and-compute pipeline executions",
            ),
            &["pipeline"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;
        registry.register(Box::new(pipeline_runs_total.clone()))?;
        registry.register(Box::new(pipeline_errors_total.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration,
            pipeline_runs_total,
            pipeline_errors_total,
            registry,
        })
    }

    /// Count one pipeline execution and, if it failed, one error.
    pub fn record_pipeline(&self, pipeline: &str, succeeded: bool) {
        self.pipeline_runs_total.with_label_values(&[pipeline]).inc();
        if !succeeded {
            self.pipeline_errors_total.with_label_values(&[pipeline]).inc();
        }
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
