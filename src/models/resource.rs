// Resource usage records (server_resources): one observation of one instance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A usage observation. Memory and disk are in bytes, CPU load in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResource {
    pub id: i64,
    pub pool_id: i64,
    pub cluster_name: String,
    pub group_name: String,
    pub ip: String,
    pub port: i64,
    pub instance_role: String,
    pub total_memory: f64,
    pub used_memory: f64,
    pub total_disk: f64,
    pub used_disk: f64,
    pub cpu_cores: i64,
    pub cpu_load: f64,
    pub date_time: DateTime<Utc>,
    /// Department of `cluster_name`, filled in by the repo when listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

impl ServerResource {
    /// used/total*100, or None when total is not a positive finite number.
    pub fn memory_usage_percent(&self) -> Option<f64> {
        usage_percent(self.used_memory, self.total_memory)
    }

    pub fn disk_usage_percent(&self) -> Option<f64> {
        usage_percent(self.used_disk, self.total_disk)
    }

    /// CPU load when it is a usable number (finite, not negative).
    pub fn cpu_usage(&self) -> Option<f64> {
        (self.cpu_load.is_finite() && self.cpu_load >= 0.0).then_some(self.cpu_load)
    }
}

fn usage_percent(used: f64, total: f64) -> Option<f64> {
    if !(total.is_finite() && used.is_finite()) || total <= 0.0 {
        return None;
    }
    Some(used / total * 100.0)
}

/// Insert payload for POST /insert-server-resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServerResource {
    pub pool_id: i64,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: i64,
    #[serde(default)]
    pub instance_role: String,
    pub total_memory: f64,
    pub used_memory: f64,
    pub total_disk: f64,
    pub used_disk: f64,
    #[serde(default)]
    pub cpu_cores: i64,
    pub cpu_load: f64,
    /// Defaults to the insert time when omitted.
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
}
