//! Resolver metrics and observability module.
//!
//! Counts what the locale resolver does per navigation: how often a request
//! resolved directly, how often it had to be corrected, and how often users
//! switched locale.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolver counters, shared behind an `Arc` by the HTTP host.
#[derive(Debug, Default)]
pub struct ResolverMetrics {
    /// Navigations that rendered without a correction
    resolved: AtomicUsize,

    /// Corrective redirects issued by the guard
    redirects: AtomicUsize,

    /// Negotiations where no hint qualified and the default locale was used
    default_fallbacks: AtomicUsize,

    /// Locale switches that navigated
    switches: AtomicUsize,

    /// Locale switches to the already active locale
    switch_noops: AtomicUsize,
}

impl ResolverMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch(&self) {
        self.switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_switch_noop(&self) {
        self.switch_noops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::Relaxed)
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn switches(&self) -> usize {
        self.switches.load(Ordering::Relaxed)
    }

    pub fn switch_noops(&self) -> usize {
        self.switch_noops.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let resolved = self.resolved();
        let redirects = self.redirects();
        let navigations = resolved + redirects;
        let redirect_rate = if navigations > 0 {
            (redirects as f64 / navigations as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            resolved,
            redirects,
            redirect_rate,
            default_fallbacks: self.default_fallbacks(),
            switches: self.switches(),
            switch_noops: self.switch_noops(),
        }
    }
}

/// Snapshot of the resolver counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub resolved: usize,

    pub redirects: usize,

    /// Share of guarded navigations that needed a redirect, as a percentage (0-100)
    pub redirect_rate: f64,

    pub default_fallbacks: usize,

    pub switches: usize,

    pub switch_noops: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ResolverMetrics::new();
        assert_eq!(metrics.resolved(), 0);
        assert_eq!(metrics.redirects(), 0);
        assert_eq!(metrics.default_fallbacks(), 0);
        assert_eq!(metrics.switches(), 0);
        assert_eq!(metrics.switch_noops(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = ResolverMetrics::new();
        metrics.record_resolved();
        metrics.record_resolved();
        metrics.record_redirect();
        metrics.record_default_fallback();
        metrics.record_switch();
        metrics.record_switch_noop();

        assert_eq!(metrics.resolved(), 2);
        assert_eq!(metrics.redirects(), 1);
        assert_eq!(metrics.default_fallbacks(), 1);
        assert_eq!(metrics.switches(), 1);
        assert_eq!(metrics.switch_noops(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = ResolverMetrics::new().report();
        assert_eq!(report.resolved, 0);
        assert_eq!(report.redirects, 0);
        assert_eq!(report.redirect_rate, 0.0);
    }

    #[test]
    fn test_report_redirect_rate() {
        let metrics = ResolverMetrics::new();

        // 3 resolved, 1 redirect = 25% redirect rate
        metrics.record_resolved();
        metrics.record_resolved();
        metrics.record_resolved();
        metrics.record_redirect();

        let report = metrics.report();
        assert_eq!(report.redirect_rate, 25.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolverMetrics::new();
        metrics.record_switch();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["switches"], 1);
        assert_eq!(json["redirect_rate"], 0.0);
    }
}
