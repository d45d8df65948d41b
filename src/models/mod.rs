// Domain models: inventory rows, usage records and derived views

mod aggregation;
mod cluster;
mod host;
mod resource;

pub use aggregation::{AggregateUsage, AlertKind, AlertRecord, DiskFullPrediction};
pub use cluster::{ClusterGroup, NewClusterGroup};
pub use host::{HostApplication, HostPool, NewHost, NewHostApplication};
pub use resource::{NewServerResource, ServerResource};
