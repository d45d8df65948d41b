// Usage analysis over an in-memory snapshot of usage records.
// Pure functions only: callers fetch the records, these never touch storage.

mod aggregate;
mod alerts;
mod datacenter;
mod prediction;

pub use aggregate::{
    aggregate_by_cluster, aggregate_by_datacenter, aggregate_by_group, aggregate_by_partition,
};
pub use alerts::{AlertThresholds, DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, detect_alerts};
pub use datacenter::{Datacenter, classify_datacenter};
pub use prediction::{DEFAULT_PREDICTION_WINDOW, latest_per_host, predict_disk_full, predict_one};
