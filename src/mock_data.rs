// Demo inventory generator. Deterministic for a given seed and reference time.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{NewClusterGroup, NewHost, NewHostApplication, NewServerResource};

const GROUPS: usize = 7;
const CLUSTERS_PER_GROUP: usize = 3;
const HOSTS: usize = 60;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

const DEPARTMENTS: [&str; 6] = ["IT", "Finance", "HR", "Marketing", "Sales", "Operations"];
const SERVER_TYPES: [&str; 6] = ["MySQL", "Redis", "MongoDB", "Nginx", "Kafka", "Elasticsearch"];
const PROTOCOLS: [&str; 3] = ["TCP", "HTTP", "HTTPS"];
const ROLES: [&str; 2] = ["master", "slave"];
const STATUSES: [&str; 3] = ["running", "stopped", "maintenance"];
const HOST_TYPES: [&str; 2] = ["0", "1"];

/// One host and everything hanging off it. `pool_id` on the resources is
/// assigned when the host row is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct MockHost {
    pub host: NewHost,
    pub applications: Vec<NewHostApplication>,
    pub resources: Vec<NewServerResource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockDataset {
    pub cluster_groups: Vec<NewClusterGroup>,
    pub hosts: Vec<MockHost>,
}

/// A fresh seed for callers that did not pin one.
pub fn random_seed() -> u64 {
    rand::random()
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Host IP for the 0-based host index. The second octet cycles 1..=5 so hosts
/// spread over datacenters P1..P5.
pub fn host_ip(index: usize) -> String {
    format!(
        "192.{}.{}.{}",
        index % 5 + 1,
        index / 255 + 1,
        index % 255 + 1
    )
}

pub fn generate(seed: u64, now: DateTime<Utc>) -> MockDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut cluster_groups = Vec::with_capacity(GROUPS * CLUSTERS_PER_GROUP);
    for i in 1..=GROUPS {
        for j in 1..=CLUSTERS_PER_GROUP {
            cluster_groups.push(NewClusterGroup {
                group_name: format!("Group{i}"),
                cluster_name: format!("Cluster{i}-{j}"),
                department_name: pick(&mut rng, &DEPARTMENTS).to_string(),
            });
        }
    }

    let mut hosts = Vec::with_capacity(HOSTS);
    for i in 1..=HOSTS {
        let ip = host_ip(i - 1);
        let vcpus = rng.gen_range(8..40i64);
        let ram_gib = rng.gen_range(1..=8i64) * 8;
        let disk_gib = rng.gen_range(1..=10i64) * 100;

        let host = NewHost {
            host_name: format!("host-{i}"),
            host_ip: ip.clone(),
            host_type: pick(&mut rng, &HOST_TYPES).to_string(),
            disk_size: Some(disk_gib),
            ram: Some(ram_gib),
            vcpus: Some(vcpus),
            rack_number: format!("R{:02}", (i - 1) / 6 + 1),
            rack_height: Some(rng.gen_range(1..=4)),
            serial_number: format!("SN{i:06}"),
            ..NewHost::default()
        };

        let app_count = rng.gen_range(1..=3);
        let applications = (0..app_count)
            .map(|_| {
                let group = &cluster_groups[rng.gen_range(0..cluster_groups.len())];
                let port: i64 = rng.gen_range(3000..6000);
                NewHostApplication {
                    server_type: pick(&mut rng, &SERVER_TYPES).to_string(),
                    server_version: format!(
                        "{}.{}.{}",
                        rng.gen_range(1..=5),
                        rng.gen_range(0..10),
                        rng.gen_range(0..20)
                    ),
                    server_subtitle: String::new(),
                    cluster_name: group.cluster_name.clone(),
                    server_protocol: pick(&mut rng, &PROTOCOLS).to_string(),
                    server_addr: format!("{ip}:{port}"),
                    server_port: port,
                    server_role: pick(&mut rng, &ROLES).to_string(),
                    server_status: pick(&mut rng, &STATUSES).to_string(),
                }
            })
            .collect();

        let group = &cluster_groups[rng.gen_range(0..cluster_groups.len())];
        let total_memory = ram_gib as f64 * GIB;
        let total_disk = disk_gib as f64 * GIB;
        let resource = NewServerResource {
            pool_id: 0,
            cluster_name: group.cluster_name.clone(),
            group_name: group.group_name.clone(),
            ip: ip.clone(),
            port: rng.gen_range(3000..6000),
            instance_role: pick(&mut rng, &ROLES).to_string(),
            total_memory,
            used_memory: total_memory * rng.gen_range(0.3..0.9),
            total_disk,
            used_disk: total_disk * rng.gen_range(0.2..0.9),
            cpu_cores: vcpus,
            cpu_load: rng.gen_range(20.0..90.0),
            date_time: Some(now - TimeDelta::hours(rng.gen_range(0..24))),
        };

        hosts.push(MockHost {
            host,
            applications,
            resources: vec![resource],
        });
    }

    MockDataset {
        cluster_groups,
        hosts,
    }
}
