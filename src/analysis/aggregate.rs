// Per-partition usage averages. Two passes: fold sums per key, then divide once.

use std::collections::BTreeMap;

use super::datacenter::classify_datacenter;
use crate::models::{AggregateUsage, ServerResource};

/// Running sums for one partition. Each metric keeps its own sample count so a
/// record with zero memory or disk capacity only drops out of that metric.
#[derive(Debug, Default, Clone, Copy)]
struct UsageSums {
    instances: usize,
    cpu: f64,
    memory: f64,
    memory_samples: usize,
    disk: f64,
    disk_samples: usize,
}

impl UsageSums {
    fn add(self, cpu: f64, record: &ServerResource) -> Self {
        let mut next = self;
        next.instances += 1;
        next.cpu += cpu;
        if let Some(m) = record.memory_usage_percent() {
            next.memory += m;
            next.memory_samples += 1;
        }
        if let Some(d) = record.disk_usage_percent() {
            next.disk += d;
            next.disk_samples += 1;
        }
        next
    }

    fn finish(self, name: String) -> AggregateUsage {
        AggregateUsage {
            name,
            total_instances: self.instances,
            avg_cpu_usage: mean(self.cpu, self.instances),
            avg_memory_usage: mean(self.memory, self.memory_samples),
            avg_disk_usage: mean(self.disk, self.disk_samples),
        }
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    sum / (n as f64)
}

/// Groups records by `key` and averages CPU load, memory % and disk % per group.
///
/// Records without a usable CPU load are skipped entirely. The returned map has one
/// entry per observed key and iterates in key order.
pub fn aggregate_by_partition<F>(
    records: &[ServerResource],
    key: F,
) -> BTreeMap<String, AggregateUsage>
where
    F: Fn(&ServerResource) -> String,
{
    let mut sums: BTreeMap<String, UsageSums> = BTreeMap::new();
    for r in records {
        let Some(cpu) = r.cpu_usage() else {
            tracing::debug!(
                pool_id = r.pool_id,
                cpu_load = r.cpu_load,
                "skipping record with invalid cpu load"
            );
            continue;
        };
        let entry = sums.entry(key(r)).or_default();
        *entry = entry.add(cpu, r);
    }

    sums.into_iter()
        .map(|(name, s)| (name.clone(), s.finish(name)))
        .collect()
}

pub fn aggregate_by_datacenter(records: &[ServerResource]) -> BTreeMap<String, AggregateUsage> {
    aggregate_by_partition(records, |r| classify_datacenter(&r.ip).to_string())
}

pub fn aggregate_by_cluster(records: &[ServerResource]) -> BTreeMap<String, AggregateUsage> {
    aggregate_by_partition(records, |r| r.cluster_name.clone())
}

pub fn aggregate_by_group(records: &[ServerResource]) -> BTreeMap<String, AggregateUsage> {
    aggregate_by_partition(records, |r| r.group_name.clone())
}
