// Report views built from analysis output: IDC summary, per-group cluster
// breakdown, and the HTML usage report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    AlertThresholds, aggregate_by_cluster, aggregate_by_datacenter, aggregate_by_group,
    latest_per_host, predict_disk_full,
};
use crate::models::{AggregateUsage, AlertKind, ClusterGroup, ServerResource};

/// Datacenter averages, one row per datacenter, sorted by name.
pub fn idc_report(records: &[ServerResource]) -> Vec<AggregateUsage> {
    aggregate_by_datacenter(records).into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReportRow {
    pub cluster_name: String,
    pub server_count: usize,
    pub avg_cpu_usage: f64,
    pub avg_memory_usage: f64,
    pub avg_disk_usage: f64,
    /// Earliest forecast among the cluster's hosts.
    pub estimated_disk_full_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    pub group_name: String,
    pub clusters: Vec<ClusterReportRow>,
}

/// Groups and clusters come from both the cluster_groups table and the records
/// themselves; configured clusters without records report zero servers.
pub fn cluster_group_report(
    groups: &[ClusterGroup],
    records: &[ServerResource],
    window: u32,
) -> Vec<GroupReport> {
    let mut layout: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for g in groups {
        layout
            .entry(g.group_name.as_str())
            .or_default()
            .insert(g.cluster_name.as_str());
    }
    for r in records {
        layout
            .entry(r.group_name.as_str())
            .or_default()
            .insert(r.cluster_name.as_str());
    }

    layout
        .into_iter()
        .map(|(group_name, clusters)| {
            let in_group: Vec<ServerResource> = records
                .iter()
                .filter(|r| r.group_name == group_name)
                .cloned()
                .collect();
            let usage = aggregate_by_cluster(&in_group);
            let rows = clusters
                .into_iter()
                .map(|cluster_name| {
                    let in_cluster: Vec<ServerResource> = in_group
                        .iter()
                        .filter(|r| r.cluster_name == cluster_name)
                        .cloned()
                        .collect();
                    let estimated_disk_full_date =
                        predict_disk_full(&latest_per_host(&in_cluster), window)
                            .into_values()
                            .map(|p| p.predicted_at)
                            .min()
                            .map(|t| t.date_naive());
                    let u = usage.get(cluster_name);
                    ClusterReportRow {
                        cluster_name: cluster_name.to_string(),
                        server_count: u.map_or(0, |u| u.total_instances),
                        avg_cpu_usage: u.map_or(0.0, |u| u.avg_cpu_usage),
                        avg_memory_usage: u.map_or(0.0, |u| u.avg_memory_usage),
                        avg_disk_usage: u.map_or(0.0, |u| u.avg_disk_usage),
                        estimated_disk_full_date,
                    }
                })
                .collect();
            GroupReport {
                group_name: group_name.to_string(),
                clusters: rows,
            }
        })
        .collect()
}

const REPORT_STYLE: &str = "
        body { font-family: Arial, sans-serif; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
        .alert { padding: 10px; margin-bottom: 10px; border-radius: 4px; }
        .alert-warning { background-color: #fff3cd; color: #856404; }
        .alert-danger { background-color: #f8d7da; color: #721c24; }
";

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn percent(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}

/// Standalone HTML page: threshold alerts, per-group averages, per-server details.
pub fn render_html_report(
    records: &[ServerResource],
    groups: &[ClusterGroup],
    thresholds: &AlertThresholds,
) -> String {
    let mut html = String::new();
    // fmt::Write into a String cannot fail.
    let _ = write!(
        html,
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<style>{REPORT_STYLE}</style>\n</head>\n<body>\n<h1>Server Resource Usage Report</h1>\n"
    );

    html.push_str("<h2>Resource Alerts</h2>\n");
    for r in records {
        let class = match thresholds.classify(r) {
            Some(AlertKind::High) => "alert-danger",
            Some(AlertKind::Low) => "alert-warning",
            None => continue,
        };
        let _ = writeln!(
            html,
            "<div class=\"alert {class}\">{} ({} {}) | Memory: {} | Disk: {} | CPU: {}</div>",
            escape_html(&r.ip),
            escape_html(&r.group_name),
            escape_html(&r.cluster_name),
            percent(r.memory_usage_percent()),
            percent(r.disk_usage_percent()),
            percent(r.cpu_usage()),
        );
    }

    html.push_str("<h2>Cluster Group Usage</h2>\n");
    let usage = aggregate_by_group(records);
    let group_names: BTreeSet<&str> = groups.iter().map(|g| g.group_name.as_str()).collect();
    for name in group_names {
        let _ = writeln!(html, "<h3>{}</h3>", escape_html(name));
        html.push_str("<table>\n<tr><th>Resource</th><th>Usage</th></tr>\n");
        if let Some(u) = usage.get(name) {
            let _ = writeln!(
                html,
                "<tr><td>Memory</td><td>{:.2}%</td></tr>\n<tr><td>Disk</td><td>{:.2}%</td></tr>\n<tr><td>CPU</td><td>{:.2}%</td></tr>",
                u.avg_memory_usage, u.avg_disk_usage, u.avg_cpu_usage
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str("<h2>Server Resource Details</h2>\n<table>\n");
    html.push_str("<tr><th>Instance ID</th><th>IP</th><th>Cluster Name</th><th>Group Name</th><th>CPU Usage</th><th>Memory Usage</th><th>Disk Usage</th></tr>\n");
    for r in records {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.id,
            escape_html(&r.ip),
            escape_html(&r.cluster_name),
            escape_html(&r.group_name),
            percent(r.cpu_usage()),
            percent(r.memory_usage_percent()),
            percent(r.disk_usage_percent()),
        );
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}
