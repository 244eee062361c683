use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// In-process counters over the pipeline's lifetime. Updated from the
/// worker jobs, read by the metrics endpoint; resets with the process.
#[derive(Default)]
pub struct MetricsRegistry {
    announcements_processed: AtomicU64,
    emergency_alerts: AtomicU64,
    failures: AtomicU64,
    languages_served: RwLock<HashMap<String, u64>>,
    last_processed: RwLock<Option<DateTime<Utc>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub announcements_processed: u64,
    pub emergency_alerts: u64,
    pub failures: u64,
    pub languages_served: HashMap<String, u64>,
    pub last_processed: Option<DateTime<Utc>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&self) {
        self.announcements_processed.fetch_add(1, Ordering::Relaxed);
        *self
            .last_processed
            .write()
            .expect("metrics lock poisoned") = Some(Utc::now());
    }

    pub fn record_emergency_alert(&self) {
        self.emergency_alerts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_served(&self, language: &str) {
        let mut served = self
            .languages_served
            .write()
            .expect("metrics lock poisoned");
        *served.entry(language.to_lowercase()).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            announcements_processed: self.announcements_processed.load(Ordering::Relaxed),
            emergency_alerts: self.emergency_alerts.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            languages_served: self
                .languages_served
                .read()
                .expect("metrics lock poisoned")
                .clone(),
            last_processed: *self.last_processed.read().expect("metrics lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = MetricsRegistry::new();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_emergency_alert();
        metrics.record_failure();
        metrics.record_language_served("hindi");
        metrics.record_language_served("Hindi");
        metrics.record_language_served("tamil");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.announcements_processed, 2);
        assert_eq!(snapshot.emergency_alerts, 1);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.languages_served.get("hindi"), Some(&2));
        assert_eq!(snapshot.languages_served.get("tamil"), Some(&1));
        assert!(snapshot.last_processed.is_some());
    }

    #[test]
    fn test_fresh_registry_is_zeroed() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.announcements_processed, 0);
        assert_eq!(snapshot.failures, 0);
        assert!(snapshot.languages_served.is_empty());
        assert!(snapshot.last_processed.is_none());
    }
}
