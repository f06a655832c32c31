//! Ingestion metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Ingestion metrics, shared between the plugin and whoever reports on it
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Records turned into fresh sensor data
    pub records_valid: AtomicU64,

    /// Records skipped because fewer than six fields parsed
    pub records_malformed: AtomicU64,
}

impl IngestionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a record accepted
    pub fn record_valid(&self) {
        self.records_valid.fetch_add(1, Ordering::Relaxed);
        observability::record_sensor_record(true);
    }

    /// Record a record skipped
    pub fn record_malformed(&self) {
        self.records_malformed.fetch_add(1, Ordering::Relaxed);
        observability::record_sensor_record(false);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_valid: self.records_valid.load(Ordering::Relaxed),
            records_malformed: self.records_malformed.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub records_valid: u64,
    pub records_malformed: u64,
}
