// Per-record threshold verdicts: high usage takes precedence over low usage.

use serde::{Deserialize, Serialize};

use crate::models::{AlertKind, AlertRecord, ServerResource};

pub const DEFAULT_HIGH_THRESHOLD: f64 = 80.0;
pub const DEFAULT_LOW_THRESHOLD: f64 = 10.0;

/// Percent thresholds applied to memory %, disk % and CPU load alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            low: DEFAULT_LOW_THRESHOLD,
        }
    }
}

impl AlertThresholds {
    /// Verdict for one record, ignoring metrics that could not be computed.
    pub fn classify(&self, record: &ServerResource) -> Option<AlertKind> {
        let metrics = [
            record.memory_usage_percent(),
            record.disk_usage_percent(),
            record.cpu_usage(),
        ];
        if metrics.iter().flatten().any(|&v| v > self.high) {
            Some(AlertKind::High)
        } else if metrics.iter().flatten().any(|&v| v < self.low) {
            Some(AlertKind::Low)
        } else {
            None
        }
    }
}

/// One alert per offending record, in input order.
pub fn detect_alerts(records: &[ServerResource], thresholds: &AlertThresholds) -> Vec<AlertRecord> {
    records
        .iter()
        .filter_map(|r| {
            let kind = thresholds.classify(r)?;
            Some(AlertRecord {
                pool_id: r.pool_id,
                ip: r.ip.clone(),
                cluster_name: r.cluster_name.clone(),
                group_name: r.group_name.clone(),
                kind,
                memory_usage: r.memory_usage_percent(),
                disk_usage: r.disk_usage_percent(),
                cpu_usage: r.cpu_usage(),
            })
        })
        .collect()
}
