// Host inventory models: hosts_pool rows and the applications they carry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One physical or virtual host from `hosts_pool`, with its applications attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPool {
    pub id: i64,
    pub host_name: String,
    pub host_ip: String,
    /// "0" = physical, "1" = virtual.
    pub host_type: String,
    pub h3c_id: String,
    pub h3c_status: String,
    /// GiB.
    pub disk_size: Option<i64>,
    /// GiB.
    pub ram: Option<i64>,
    pub vcpus: Option<i64>,
    pub leaf_number: String,
    pub rack_number: String,
    pub rack_height: Option<i64>,
    pub rack_start_number: Option<i64>,
    pub serial_number: String,
    pub is_deleted: bool,
    pub is_static: bool,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    #[serde(default)]
    pub host_applications: Vec<HostApplication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostApplication {
    pub id: i64,
    pub pool_id: i64,
    pub server_type: String,
    pub server_version: String,
    pub server_subtitle: String,
    pub cluster_name: String,
    pub server_protocol: String,
    pub server_addr: String,
    pub server_port: i64,
    pub server_role: String,
    pub server_status: String,
    /// Resolved from cluster_groups by cluster name; not stored on the row.
    pub department_name: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Insert payload for a host. Fields the generator never fills default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewHost {
    pub host_name: String,
    pub host_ip: String,
    pub host_type: String,
    #[serde(default)]
    pub h3c_id: String,
    #[serde(default)]
    pub h3c_status: String,
    pub disk_size: Option<i64>,
    pub ram: Option<i64>,
    pub vcpus: Option<i64>,
    #[serde(default)]
    pub leaf_number: String,
    pub rack_number: String,
    pub rack_height: Option<i64>,
    pub rack_start_number: Option<i64>,
    pub serial_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewHostApplication {
    pub server_type: String,
    pub server_version: String,
    #[serde(default)]
    pub server_subtitle: String,
    pub cluster_name: String,
    pub server_protocol: String,
    pub server_addr: String,
    pub server_port: i64,
    pub server_role: String,
    pub server_status: String,
}
