// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use cmdb::cmdb_repo::CmdbRepo;
use cmdb::models::ServerResource;
use tempfile::TempDir;

pub fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Usage record with memory/disk given as (used, total) and CPU load in percent.
pub fn record(
    pool_id: i64,
    ip: &str,
    memory: (f64, f64),
    disk: (f64, f64),
    cpu_load: f64,
) -> ServerResource {
    ServerResource {
        id: pool_id,
        pool_id,
        cluster_name: "Cluster1-1".into(),
        group_name: "Group1".into(),
        ip: ip.into(),
        port: 3306,
        instance_role: "master".into(),
        total_memory: memory.1,
        used_memory: memory.0,
        total_disk: disk.1,
        used_disk: disk.0,
        cpu_cores: 8,
        cpu_load,
        date_time: ts(2024, 1, 1, 0),
        department_name: None,
    }
}

pub fn in_cluster(mut r: ServerResource, group: &str, cluster: &str) -> ServerResource {
    r.group_name = group.into();
    r.cluster_name = cluster.into();
    r
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub async fn temp_repo() -> (TempDir, CmdbRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cmdb.db");
    let repo = CmdbRepo::connect(path.to_str().unwrap(), 2).await.unwrap();
    repo.init().await.unwrap();
    (dir, repo)
}
