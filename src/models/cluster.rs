// Cluster → group → department mapping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    pub id: i64,
    pub group_name: String,
    pub cluster_name: String,
    pub department_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClusterGroup {
    pub group_name: String,
    pub cluster_name: String,
    pub department_name: String,
}
