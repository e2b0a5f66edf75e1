//! C10 — MetricsCollector (§B.5): monotonic counters plus a running
//! confidence average, updated from every terminal decision. Counters
//! are independent atomics; the confidence sum is the one quantity that
//! needs read-modify-write, so it sits behind a single fine-grained lock
//! rather than a CAS loop on bit-cast floats.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use noteroute_core::model::RoutingDecision;

/// Point-in-time snapshot returned by [`MetricsCollector::stats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterStats {
    pub total_routed: u64,
    pub duplicates_found: u64,
    pub folders_created: u64,
    pub unsorted_count: u64,
    pub average_confidence: f64,
}

/// Rolling counters for one `Router`'s lifetime. Every method is safe to
/// call concurrently from any number of in-flight pipeline tasks.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    total_routed: AtomicU64,
    duplicates_found: AtomicU64,
    folders_created: AtomicU64,
    unsorted_count: AtomicU64,
    confidence_count: AtomicU64,
    confidence_sum: Mutex<f64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one terminal decision into the running counters.
    pub fn record(&self, decision: &RoutingDecision) {
        self.total_routed.fetch_add(1, Ordering::Relaxed);
        match decision {
            RoutingDecision::Duplicate { .. } => {
                self.duplicates_found.fetch_add(1, Ordering::Relaxed);
            }
            RoutingDecision::CreateFolder { .. } => {
                self.folders_created.fetch_add(1, Ordering::Relaxed);
            }
            RoutingDecision::Unsorted { .. } => {
                self.unsorted_count.fetch_add(1, Ordering::Relaxed);
            }
            RoutingDecision::Route { .. } | RoutingDecision::Review { .. } => {}
        }
        *self.confidence_sum.lock() += decision.confidence();
        self.confidence_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> RouterStats {
        let count = self.confidence_count.load(Ordering::Relaxed);
        let average_confidence = if count == 0 { 0.0 } else { *self.confidence_sum.lock() / count as f64 };
        RouterStats {
            total_routed: self.total_routed.load(Ordering::Relaxed),
            duplicates_found: self.duplicates_found.load(Ordering::Relaxed),
            folders_created: self.folders_created.load(Ordering::Relaxed),
            unsorted_count: self.unsorted_count.load(Ordering::Relaxed),
            average_confidence,
        }
    }

    /// Zero every counter. Not part of the routing contract itself — a
    /// hook for test isolation and long-running-process ops resets.
    pub fn reset(&self) {
        self.total_routed.store(0, Ordering::Relaxed);
        self.duplicates_found.store(0, Ordering::Relaxed);
        self.folders_created.store(0, Ordering::Relaxed);
        self.unsorted_count.store(0, Ordering::Relaxed);
        self.confidence_count.store(0, Ordering::Relaxed);
        *self.confidence_sum.lock() = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noteroute_core::model::{DecisionExplanation, FolderPlacement, PrimarySignal};
    use std::collections::HashMap;

    fn explanation() -> DecisionExplanation {
        DecisionExplanation {
            primary_signal: PrimarySignal::AboveHighConfidence,
            similar_concepts: vec![],
            factors: vec![],
            top_folder_matches: vec![],
            summary: "test".into(),
        }
    }

    #[test]
    fn empty_collector_reports_zero_average() {
        let metrics = MetricsCollector::new();
        assert_eq!(metrics.stats().average_confidence, 0.0);
    }

    #[test]
    fn records_each_decision_kind_into_its_own_counter() {
        let metrics = MetricsCollector::new();
        let mut confidences = HashMap::new();
        confidences.insert("a".to_string(), 0.9);
        metrics.record(&RoutingDecision::Route {
            placement: FolderPlacement::new("a".to_string(), vec![], confidences).unwrap(),
            confidence: 0.9,
            explanation: explanation(),
            timestamp: Utc::now(),
        });
        metrics.record(&RoutingDecision::Duplicate {
            duplicate_id: "c0".into(),
            confidence: 0.99,
            explanation: explanation(),
            timestamp: Utc::now(),
        });
        metrics.record(&RoutingDecision::Unsorted {
            confidence: 0.1,
            explanation: explanation(),
            timestamp: Utc::now(),
        });

        let stats = metrics.stats();
        assert_eq!(stats.total_routed, 3);
        assert_eq!(stats.duplicates_found, 1);
        assert_eq!(stats.unsorted_count, 1);
        assert!((stats.average_confidence - (0.9 + 0.99 + 0.1) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn reset_zeroes_everything() {
        let metrics = MetricsCollector::new();
        metrics.record(&RoutingDecision::Unsorted {
            confidence: 0.2,
            explanation: explanation(),
            timestamp: Utc::now(),
        });
        metrics.reset();
        assert_eq!(metrics.stats(), RouterStats {
            total_routed: 0,
            duplicates_found: 0,
            folders_created: 0,
            unsorted_count: 0,
            average_confidence: 0.0,
        });
    }
}
