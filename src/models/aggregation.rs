// Derived views over usage records: per-partition averages, alerts, disk-full forecasts.
// Computed on demand by crate::analysis; never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Averages for one partition (datacenter, cluster or group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateUsage {
    pub name: String,
    pub total_instances: usize,
    pub avg_cpu_usage: f64,
    pub avg_memory_usage: f64,
    pub avg_disk_usage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Some metric above the high threshold.
    High,
    /// Some metric below the low threshold (underused).
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub pool_id: i64,
    pub ip: String,
    pub cluster_name: String,
    pub group_name: String,
    pub kind: AlertKind,
    pub memory_usage: Option<f64>,
    pub disk_usage: Option<f64>,
    pub cpu_usage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskFullPrediction {
    pub pool_id: i64,
    /// Bytes per day.
    pub daily_consumption: f64,
    pub days_remaining: f64,
    pub predicted_at: DateTime<Utc>,
}
