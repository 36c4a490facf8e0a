//! Invocation counters shared by adapted tools.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters of adapter invocations.
///
/// One instance may be shared by every adapter of a server via `Arc`.
#[derive(Debug, Default)]
pub struct AdapterStats {
    calls: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`AdapterStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Total invocations.
    pub calls: u64,
    /// Invocations that produced a success envelope.
    pub successes: u64,
    /// Invocations that produced a failure envelope.
    pub failures: u64,
}

impl StatsSnapshot {
    /// Fraction of calls that succeeded; `0.0` when nothing was called.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.successes as f64 / self.calls as f64
        }
    }
}

impl AdapterStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, success: bool) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Shorthand for `snapshot().success_rate()`.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.snapshot().success_rate()
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.successes.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_zero_rate() {
        let stats = AdapterStats::new();
        assert_eq!(stats.snapshot().calls, 0);
        assert!(stats.success_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn records_outcomes() {
        let stats = AdapterStats::new();
        stats.record(true);
        stats.record(true);
        stats.record(true);
        stats.record(false);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.calls, 4);
        assert_eq!(snapshot.failures, 1);
        assert!((snapshot.success_rate() - 0.75).abs() < f64::EPSILON);

        stats.reset();
        assert_eq!(stats.snapshot().calls, 0);
    }
}
