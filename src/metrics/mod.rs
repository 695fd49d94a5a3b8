//! Prometheus metrics for the API clients and the microsite
//!
//! This module provides metrics tracking for:
//! - API clients: requests by surface, endpoint and status, request latency
//! - Public cache: hits and misses per resource
//! - Microsite: rendered pages by route and status
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for API client metrics
struct ApiMetrics {
    requests: CounterVec,
    duration: HistogramVec,
    cache_hits: CounterVec,
    cache_misses: CounterVec,
}

/// Container for microsite metrics
struct SiteMetrics {
    page_renders: CounterVec,
    render_duration: HistogramVec,
}

static API_METRICS: OnceLock<ApiMetrics> = OnceLock::new();

static SITE_METRICS: OnceLock<SiteMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// Call once at startup. If registration fails, subsequent metric
/// operations become no-ops.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = reputation::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let api = ApiMetrics {
        requests: register_counter_vec!(
            "reputation_api_requests_total",
            "Total API requests by surface, endpoint and status",
            &["surface", "endpoint", "status"]
        )?,
        duration: register_histogram_vec!(
            "reputation_api_request_duration_seconds",
            "API request duration in seconds",
            &["surface", "endpoint"],
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
        )?,
        cache_hits: register_counter_vec!(
            "reputation_public_cache_hits_total",
            "Public API reads served from the revalidation cache",
            &["resource"]
        )?,
        cache_misses: register_counter_vec!(
            "reputation_public_cache_misses_total",
            "Public API reads that went to the network",
            &["resource"]
        )?,
    };

    let site = SiteMetrics {
        page_renders: register_counter_vec!(
            "reputation_site_page_renders_total",
            "Microsite pages rendered by route and status",
            &["route", "status"]
        )?,
        render_duration: register_histogram_vec!(
            "reputation_site_render_duration_seconds",
            "Time to fetch and render a microsite page",
            &["route"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
        )?,
    };

    API_METRICS.set(api).map_err(|_| "API metrics already initialized")?;
    SITE_METRICS.set(site).map_err(|_| "Site metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    API_METRICS.get().is_some() && SITE_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record one API call. `status` is 0 when no response arrived.
pub fn record_api_request(surface: &str, endpoint: &str, status: u16, duration_secs: f64) {
    let Some(m) = API_METRICS.get() else {
        return;
    };

    let status_str = status.to_string();
    m.requests
        .with_label_values(&[surface, endpoint, &status_str])
        .inc();
    m.duration
        .with_label_values(&[surface, endpoint])
        .observe(duration_secs);
}

/// Record a public cache lookup
pub fn record_cache_lookup(resource: &str, hit: bool) {
    let Some(m) = API_METRICS.get() else {
        return;
    };

    if hit {
        m.cache_hits.with_label_values(&[resource]).inc();
    } else {
        m.cache_misses.with_label_values(&[resource]).inc();
    }
}

/// Record a rendered microsite page
pub fn record_page_render(route: &str, status: u16) {
    if let Some(m) = SITE_METRICS.get() {
        m.page_renders
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a page render timer for a route
pub fn start_render_timer(route: &str) -> MetricsTimer {
    match SITE_METRICS.get() {
        Some(m) => MetricsTimer::new(m.render_duration.with_label_values(&[route]).start_timer()),
        None => MetricsTimer::noop(),
    }
}
