// Demo data generator tests

mod common;

use std::collections::HashSet;

use chrono::TimeDelta;
use cmdb::analysis::{Datacenter, classify_datacenter};
use cmdb::mock_data::{generate, host_ip};
use common::ts;

#[test]
fn test_generate_is_deterministic_for_seed() {
    let now = ts(2024, 6, 1, 12);
    assert_eq!(generate(42, now), generate(42, now));
    assert_ne!(generate(42, now), generate(43, now));
}

#[test]
fn test_generate_cluster_layout() {
    let data = generate(1, ts(2024, 6, 1, 12));
    assert_eq!(data.cluster_groups.len(), 21);

    let groups: HashSet<_> = data.cluster_groups.iter().map(|g| g.group_name.as_str()).collect();
    assert_eq!(groups.len(), 7);
    assert!(groups.contains("Group1"));
    assert!(groups.contains("Group7"));
    assert!(
        data.cluster_groups
            .iter()
            .any(|g| g.group_name == "Group3" && g.cluster_name == "Cluster3-2")
    );
    assert!(data.cluster_groups.iter().all(|g| !g.department_name.is_empty()));
}

#[test]
fn test_generate_hosts_shape() {
    let data = generate(7, ts(2024, 6, 1, 12));
    assert_eq!(data.hosts.len(), 60);

    let clusters: HashSet<_> = data.cluster_groups.iter().map(|g| g.cluster_name.clone()).collect();
    for (i, mock) in data.hosts.iter().enumerate() {
        assert_eq!(mock.host.host_ip, host_ip(i));
        assert!((1..=3).contains(&mock.applications.len()));
        assert!(mock.applications.iter().all(|a| clusters.contains(&a.cluster_name)));

        let vcpus = mock.host.vcpus.unwrap();
        assert!((8..40).contains(&vcpus));
        assert_eq!(mock.host.ram.unwrap() % 8, 0);
        assert_eq!(mock.host.disk_size.unwrap() % 100, 0);

        assert_eq!(mock.resources.len(), 1);
        let r = &mock.resources[0];
        assert_eq!(r.ip, mock.host.host_ip);
        assert!(clusters.contains(&r.cluster_name));
        assert!((20.0..90.0).contains(&r.cpu_load));
    }
}

#[test]
fn test_generate_usage_ratios_in_range() {
    let now = ts(2024, 6, 1, 12);
    let data = generate(99, now);
    for r in data.hosts.iter().flat_map(|h| &h.resources) {
        let mem = r.used_memory / r.total_memory;
        let disk = r.used_disk / r.total_disk;
        assert!((0.3..0.9).contains(&mem), "memory ratio {mem}");
        assert!((0.2..0.9).contains(&disk), "disk ratio {disk}");
        let at = r.date_time.unwrap();
        assert!(at <= now && at > now - TimeDelta::hours(24));
    }
}

#[test]
fn test_host_ips_spread_over_datacenters() {
    assert_eq!(host_ip(0), "192.1.1.1");
    assert_eq!(host_ip(1), "192.2.1.2");
    assert_eq!(host_ip(5), "192.1.1.6");
    assert_eq!(host_ip(255), "192.1.2.1");

    let dcs: HashSet<_> = (0..60).map(|i| classify_datacenter(&host_ip(i))).collect();
    assert_eq!(dcs.len(), 5);
    assert!(!dcs.contains(&Datacenter::P6));
    assert!(!dcs.contains(&Datacenter::Unknown));
}
