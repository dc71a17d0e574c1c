//! Process-local counters.
//!
//! The server side counts contact operations, the API client counts the
//! requests it sends. A [`Metrics`] value is cheap to clone and every clone
//! shares the same counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shared monotonically increasing counter.
#[derive(Debug, Clone, Default)]
pub struct Counter(Arc<AtomicU64>);

impl Counter {
    pub fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn incr(&self) {
        self.add(1);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Metrics {
    requests: Counter,
    request_errors: Counter,
    request_millis: Counter,
    listed: Counter,
    created: Counter,
    updated: Counter,
    deleted: Counter,
    rejected: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing one outgoing request.
    pub fn start_request(&self) -> HttpTimer {
        HttpTimer {
            start: Instant::now(),
            metrics: self.clone(),
        }
    }

    pub fn record_http_request(&self, duration: Duration) {
        self.requests.incr();
        self.request_millis
            .add(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
    }

    pub fn record_http_error(&self) {
        self.request_errors.incr();
    }

    /// Count the rows returned by a list.
    pub fn record_contacts_listed(&self, count: usize) {
        self.listed.add(count as u64);
    }

    pub fn record_contact_created(&self) {
        self.created.incr();
    }

    pub fn record_contact_updated(&self) {
        self.updated.incr();
    }

    pub fn record_contact_deleted(&self) {
        self.deleted.incr();
    }

    /// A payload or property value failed validation.
    pub fn record_validation_failure(&self) {
        self.rejected.incr();
    }

    pub fn http_requests_total(&self) -> u64 {
        self.requests.get()
    }

    pub fn http_errors_total(&self) -> u64 {
        self.request_errors.get()
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.request_millis.get()
    }

    /// Mean request duration, zero before the first request.
    pub fn http_duration_avg_ms(&self) -> f64 {
        match self.requests.get() {
            0 => 0.0,
            count => self.request_millis.get() as f64 / count as f64,
        }
    }

    pub fn contacts_listed_total(&self) -> u64 {
        self.listed.get()
    }

    pub fn contacts_created_total(&self) -> u64 {
        self.created.get()
    }

    pub fn contacts_updated_total(&self) -> u64 {
        self.updated.get()
    }

    pub fn contacts_deleted_total(&self) -> u64 {
        self.deleted.get()
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.rejected.get()
    }

    pub fn reset(&self) {
        for counter in [
            &self.requests,
            &self.request_errors,
            &self.request_millis,
            &self.listed,
            &self.created,
            &self.updated,
            &self.deleted,
            &self.rejected,
        ] {
            counter.clear();
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contacts_listed_total: self.contacts_listed_total(),
            contacts_created_total: self.contacts_created_total(),
            contacts_updated_total: self.contacts_updated_total(),
            contacts_deleted_total: self.contacts_deleted_total(),
            validation_failures_total: self.validation_failures_total(),
        }
    }
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_listed_total: u64,
    pub contacts_created_total: u64,
    pub contacts_updated_total: u64,
    pub contacts_deleted_total: u64,
    pub validation_failures_total: u64,
}

/// Running timer for one outgoing request, see [`Metrics::start_request`].
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Record the request and, when `ok` is false, an error.
    pub fn finish(self, ok: bool) {
        self.metrics.record_http_request(self.start.elapsed());
        if !ok {
            self.metrics.record_http_error();
        }
    }
}
