// Model serialization and derived-metric tests

mod common;

use cmdb::models::*;
use common::{assert_close, record};

#[test]
fn test_usage_percent_helpers() {
    let r = record(1, "10.1.0.1", (25.0, 200.0), (750.0, 1000.0), 42.5);
    assert_close(r.memory_usage_percent().unwrap(), 12.5);
    assert_close(r.disk_usage_percent().unwrap(), 75.0);
    assert_eq!(r.cpu_usage(), Some(42.5));
}

#[test]
fn test_usage_percent_none_without_capacity() {
    let r = record(1, "10.1.0.1", (25.0, 0.0), (10.0, -1.0), 42.5);
    assert_eq!(r.memory_usage_percent(), None);
    assert_eq!(r.disk_usage_percent(), None);

    let r = record(1, "10.1.0.1", (f64::NAN, 100.0), (10.0, f64::INFINITY), 42.5);
    assert_eq!(r.memory_usage_percent(), None);
    assert_eq!(r.disk_usage_percent(), None);
}

#[test]
fn test_cpu_usage_rejects_invalid_load() {
    assert_eq!(record(1, "x", (1.0, 2.0), (1.0, 2.0), f64::NAN).cpu_usage(), None);
    assert_eq!(record(1, "x", (1.0, 2.0), (1.0, 2.0), -0.5).cpu_usage(), None);
    assert_eq!(record(1, "x", (1.0, 2.0), (1.0, 2.0), 0.0).cpu_usage(), Some(0.0));
}

#[test]
fn test_server_resource_json_omits_missing_department() {
    let mut r = record(1, "10.1.0.1", (1.0, 2.0), (1.0, 2.0), 3.0);
    let json = serde_json::to_value(&r).unwrap();
    assert!(json.get("department_name").is_none());
    assert_eq!(json["ip"], "10.1.0.1");

    r.department_name = Some("IT".into());
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["department_name"], "IT");
    let back: ServerResource = serde_json::from_value(json).unwrap();
    assert_eq!(back, r);
}

#[test]
fn test_new_server_resource_defaults_optional_fields() {
    let body = serde_json::json!({
        "pool_id": 3,
        "total_memory": 100.0,
        "used_memory": 50.0,
        "total_disk": 1000.0,
        "used_disk": 200.0,
        "cpu_load": 12.0
    });
    let r: NewServerResource = serde_json::from_value(body).unwrap();
    assert_eq!(r.pool_id, 3);
    assert_eq!(r.cluster_name, "");
    assert_eq!(r.port, 0);
    assert_eq!(r.cpu_cores, 0);
    assert_eq!(r.date_time, None);
}

#[test]
fn test_new_server_resource_requires_measurements() {
    let body = serde_json::json!({ "pool_id": 3, "cpu_load": 12.0 });
    assert!(serde_json::from_value::<NewServerResource>(body).is_err());
}

#[test]
fn test_alert_kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(AlertKind::High).unwrap(), "high");
    assert_eq!(serde_json::to_value(AlertKind::Low).unwrap(), "low");
    let k: AlertKind = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(k, AlertKind::Low);
}

#[test]
fn test_aggregate_usage_field_names() {
    let u = AggregateUsage {
        name: "P1".into(),
        total_instances: 2,
        avg_cpu_usage: 40.0,
        avg_memory_usage: 60.0,
        avg_disk_usage: 30.0,
    };
    let json = serde_json::to_value(&u).unwrap();
    assert_eq!(json["name"], "P1");
    assert_eq!(json["total_instances"], 2);
    assert_eq!(json["avg_memory_usage"], 60.0);
}

#[test]
fn test_new_host_default_is_empty() {
    let h = NewHost::default();
    assert!(h.host_name.is_empty());
    assert_eq!(h.ram, None);
}
