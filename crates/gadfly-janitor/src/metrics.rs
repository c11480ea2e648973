//! Metrics collection for Janitor operations

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metrics collected across sweeps
///
/// Pruned and decayed counts accumulate; expired and expiring-soon counts
/// describe the graph as of the last sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JanitorMetrics {
    /// Facts removed for being past their expiry
    pub facts_pruned: usize,

    /// Expired facts seen by the last sweep, pruned or not
    pub facts_expired: usize,

    /// Facts inside the warning window at the last sweep
    pub facts_expiring_soon: usize,

    /// Profiles whose deviation grew from idleness
    pub profiles_decayed: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// When the last sweep ran
    pub last_sweep: Option<DateTime<Utc>>,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record facts removed
    pub fn record_pruned(&mut self, count: usize) {
        self.facts_pruned += count;
    }

    /// Record the audit partition sizes from the current sweep
    pub fn record_audit(&mut self, expired: usize, expiring_soon: usize) {
        self.facts_expired = expired;
        self.facts_expiring_soon = expiring_soon;
    }

    /// Record a profile decay
    pub fn record_decay(&mut self) {
        self.profiles_decayed += 1;
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self, at: DateTime<Utc>) {
        self.sweep_count += 1;
        self.last_sweep = Some(at);
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Janitor Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
        ];
        if let Some(at) = self.last_sweep {
            lines.push(format!("Last sweep: {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
        }
        lines.push(String::new());
        lines.push(format!("Facts expired: {}", self.facts_expired));
        lines.push(format!("Facts pruned: {}", self.facts_pruned));
        lines.push(format!("Facts expiring soon: {}", self.facts_expiring_soon));
        lines.push(format!("Profiles decayed: {}", self.profiles_decayed));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metrics_creation() {
        let metrics = JanitorMetrics::new();
        assert_eq!(metrics.facts_pruned, 0);
        assert_eq!(metrics.profiles_decayed, 0);
        assert_eq!(metrics.sweep_count, 0);
        assert!(metrics.last_sweep.is_none());
    }

    #[test]
    fn test_counters_accumulate_but_audit_overwrites() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_pruned(3);
        metrics.record_pruned(2);
        metrics.record_audit(5, 4);
        metrics.record_audit(1, 2);
        metrics.record_decay();

        assert_eq!(metrics.facts_pruned, 5);
        assert_eq!(metrics.facts_expired, 1);
        assert_eq!(metrics.facts_expiring_soon, 2);
        assert_eq!(metrics.profiles_decayed, 1);
    }

    #[test]
    fn test_reset() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_pruned(10);
        metrics.record_sweep(Utc::now());

        metrics.reset();

        assert_eq!(metrics, JanitorMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_pruned(5);
        metrics.record_audit(5, 1);
        metrics.record_decay();
        metrics.record_sweep(Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap());

        let summary = metrics.summary();
        assert!(summary.contains("Sweep cycles: 1"));
        assert!(summary.contains("Last sweep: 2026-04-01 09:30:00 UTC"));
        assert!(summary.contains("Facts pruned: 5"));
        assert!(summary.contains("Facts expiring soon: 1"));
        assert!(summary.contains("Profiles decayed: 1"));
    }
}
