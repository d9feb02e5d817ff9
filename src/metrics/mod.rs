//! Basic metrics instrumentation for the submission pipeline.
//!
//! Provides counters for submission outcomes and for the HTTP traffic of the
//! verification and persistence clients.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the submission pipeline.
///
/// Cloning is cheap; clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Submit attempts that entered the pipeline
    submissions_attempted_total: Arc<AtomicU64>,

    /// Attempts rejected by the validation schema
    submissions_invalid_total: Arc<AtomicU64>,

    /// Attempts denied at the CAPTCHA stage
    captcha_denied_total: Arc<AtomicU64>,

    /// Attempts that failed at the persistence stage
    persist_failures_total: Arc<AtomicU64>,

    /// Submissions appended to the store
    submissions_persisted_total: Arc<AtomicU64>,

    /// Submits ignored because one was already in flight
    duplicate_submits_total: Arc<AtomicU64>,

    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            submissions_attempted_total: Arc::new(AtomicU64::new(0)),
            submissions_invalid_total: Arc::new(AtomicU64::new(0)),
            captcha_denied_total: Arc::new(AtomicU64::new(0)),
            persist_failures_total: Arc::new(AtomicU64::new(0)),
            submissions_persisted_total: Arc::new(AtomicU64::new(0)),
            duplicate_submits_total: Arc::new(AtomicU64::new(0)),
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a submit attempt entering the pipeline.
    pub fn record_submission_attempted(&self) {
        self.submissions_attempted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record an attempt rejected by validation.
    pub fn record_submission_invalid(&self) {
        self.submissions_invalid_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record an attempt denied at the CAPTCHA stage.
    pub fn record_captcha_denied(&self) {
        self.captcha_denied_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an attempt that failed at the persistence stage.
    pub fn record_persist_failure(&self) {
        self.persist_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission appended to the store.
    pub fn record_submission_persisted(&self) {
        self.submissions_persisted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submit ignored because one was already in flight.
    pub fn record_duplicate_submit(&self) {
        self.duplicate_submits_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total submit attempts.
    pub fn submissions_attempted_total(&self) -> u64 {
        self.submissions_attempted_total.load(Ordering::Relaxed)
    }

    /// Get total validation rejections.
    pub fn submissions_invalid_total(&self) -> u64 {
        self.submissions_invalid_total.load(Ordering::Relaxed)
    }

    /// Get total CAPTCHA denials.
    pub fn captcha_denied_total(&self) -> u64 {
        self.captcha_denied_total.load(Ordering::Relaxed)
    }

    /// Get total persistence failures.
    pub fn persist_failures_total(&self) -> u64 {
        self.persist_failures_total.load(Ordering::Relaxed)
    }

    /// Get total persisted submissions.
    pub fn submissions_persisted_total(&self) -> u64 {
        self.submissions_persisted_total.load(Ordering::Relaxed)
    }

    /// Get total duplicate submits.
    pub fn duplicate_submits_total(&self) -> u64 {
        self.duplicate_submits_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.submissions_attempted_total.store(0, Ordering::Relaxed);
        self.submissions_invalid_total.store(0, Ordering::Relaxed);
        self.captcha_denied_total.store(0, Ordering::Relaxed);
        self.persist_failures_total.store(0, Ordering::Relaxed);
        self.submissions_persisted_total.store(0, Ordering::Relaxed);
        self.duplicate_submits_total.store(0, Ordering::Relaxed);
        self.http_requests_total.store(0, Ordering::Relaxed);
        self.http_errors_total.store(0, Ordering::Relaxed);
        self.http_duration_total_ms.store(0, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            submissions_attempted_total: self.submissions_attempted_total(),
            submissions_invalid_total: self.submissions_invalid_total(),
            captcha_denied_total: self.captcha_denied_total(),
            persist_failures_total: self.persist_failures_total(),
            submissions_persisted_total: self.submissions_persisted_total(),
            duplicate_submits_total: self.duplicate_submits_total(),
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub submissions_attempted_total: u64,
    pub submissions_invalid_total: u64,
    pub captcha_denied_total: u64,
    pub persist_failures_total: u64,
    pub submissions_persisted_total: u64,
    pub duplicate_submits_total: u64,
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
}
