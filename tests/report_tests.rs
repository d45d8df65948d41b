// Report view tests: IDC summary, cluster-group breakdown, HTML page

mod common;

use chrono::{NaiveDate, TimeDelta};
use cmdb::analysis::AlertThresholds;
use cmdb::models::ClusterGroup;
use cmdb::report::{cluster_group_report, idc_report, render_html_report};
use common::{assert_close, in_cluster, record, ts};

fn group(id: i64, group: &str, cluster: &str) -> ClusterGroup {
    ClusterGroup {
        id,
        group_name: group.into(),
        cluster_name: cluster.into(),
        department_name: "IT".into(),
        created_at: ts(2024, 1, 1, 0),
    }
}

#[test]
fn test_idc_report_sorted_by_datacenter() {
    let records = vec![
        record(1, "10.3.0.1", (50.0, 100.0), (50.0, 100.0), 50.0),
        record(2, "junk", (50.0, 100.0), (50.0, 100.0), 50.0),
        record(3, "10.1.0.1", (50.0, 100.0), (50.0, 100.0), 50.0),
    ];
    let names: Vec<String> = idc_report(&records).into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["P1", "P3", "Unknown"]);
}

#[test]
fn test_cluster_group_report_merges_layout_and_records() {
    let groups = vec![
        group(1, "Group2", "Cluster2-1"),
        group(2, "Group1", "Cluster1-2"),
        group(3, "Group1", "Cluster1-1"),
    ];
    let records = vec![
        in_cluster(record(1, "10.1.0.1", (40.0, 100.0), (500.0, 1000.0), 20.0), "Group1", "Cluster1-1"),
        in_cluster(record(2, "10.1.0.2", (60.0, 100.0), (250.0, 1000.0), 40.0), "Group1", "Cluster1-1"),
        in_cluster(record(3, "10.1.0.3", (60.0, 100.0), (250.0, 1000.0), 40.0), "Group9", "Cluster9-1"),
    ];

    let report = cluster_group_report(&groups, &records, 30);
    let names: Vec<&str> = report.iter().map(|g| g.group_name.as_str()).collect();
    assert_eq!(names, vec!["Group1", "Group2", "Group9"]);

    let g1 = &report[0];
    let clusters: Vec<&str> = g1.clusters.iter().map(|c| c.cluster_name.as_str()).collect();
    assert_eq!(clusters, vec!["Cluster1-1", "Cluster1-2"]);

    let c11 = &g1.clusters[0];
    assert_eq!(c11.server_count, 2);
    assert_close(c11.avg_cpu_usage, 30.0);
    assert_close(c11.avg_memory_usage, 50.0);
    assert_close(c11.avg_disk_usage, 37.5);
    // Host 1 fills in 30 days, host 2 in 90; the earlier date is reported.
    let expected = (ts(2024, 1, 1, 0) + TimeDelta::days(30)).date_naive();
    assert_eq!(c11.estimated_disk_full_date, Some(expected));
    assert_eq!(expected, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

    let c12 = &g1.clusters[1];
    assert_eq!(c12.server_count, 0);
    assert_eq!(c12.avg_cpu_usage, 0.0);
    assert_eq!(c12.estimated_disk_full_date, None);

    assert_eq!(report[2].clusters[0].server_count, 1);
}

#[test]
fn test_html_report_sections_and_alerts() {
    let records = vec![
        record(1, "10.1.0.1", (95.0, 100.0), (50.0, 100.0), 50.0),
        record(2, "10.1.0.2", (50.0, 100.0), (50.0, 100.0), 5.0),
        record(3, "10.1.0.3", (50.0, 100.0), (50.0, 100.0), 50.0),
    ];
    let groups = vec![group(1, "Group1", "Cluster1-1")];
    let html = render_html_report(&records, &groups, &AlertThresholds::default());

    assert!(html.starts_with("<html>"));
    assert!(html.contains("<h1>Server Resource Usage Report</h1>"));
    assert!(html.contains("<h2>Resource Alerts</h2>"));
    assert!(html.contains("<h2>Cluster Group Usage</h2>"));
    assert!(html.contains("<h2>Server Resource Details</h2>"));
    assert_eq!(html.matches("alert-danger\">").count(), 1);
    assert_eq!(html.matches("alert-warning\">").count(), 1);
    assert!(html.contains("<h3>Group1</h3>"));
    assert!(html.contains("<td>10.1.0.3</td>"));
    assert!(html.contains("Memory: 95.00%"));
}

#[test]
fn test_html_report_escapes_names() {
    let records = vec![in_cluster(
        record(1, "10.1.0.1", (50.0, 100.0), (50.0, 100.0), 50.0),
        "<script>",
        "a&b",
    )];
    let groups = vec![group(1, "<script>", "a&b")];
    let html = render_html_report(&records, &groups, &AlertThresholds::default());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("a&amp;b"));
}

#[test]
fn test_html_report_marks_missing_metrics() {
    let records = vec![record(1, "10.1.0.1", (0.0, 0.0), (50.0, 100.0), 50.0)];
    let html = render_html_report(&records, &[], &AlertThresholds::default());
    assert!(html.contains("<td>n/a</td>"));
}
