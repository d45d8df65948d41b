// Usage record handlers: listing, insert, datacenter usage, alerts, disk-full forecast

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Deserialize;

use super::AppState;
use crate::analysis::{aggregate_by_datacenter, detect_alerts, latest_per_host, predict_disk_full};
use crate::error::{ApiError, ApiResult};
use crate::models::{AggregateUsage, AlertRecord, ClusterGroup, NewServerResource, ServerResource};

/// GET /get_cluster_usage: per-datacenter averages, sorted by datacenter.
pub(super) async fn cluster_usage(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AggregateUsage>>> {
    let records = state.repo.list_server_resources(None).await?;
    Ok(Json(aggregate_by_datacenter(&records).into_values().collect()))
}

/// GET /cluster-resource-usage: every usage record.
pub(super) async fn cluster_resource_usage(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ServerResource>>> {
    Ok(Json(state.repo.list_server_resources(None).await?))
}

/// GET /resource-alerts
pub(super) async fn resource_alerts(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AlertRecord>>> {
    let records = state.repo.list_server_resources(None).await?;
    let thresholds = state.config.analysis.thresholds();
    Ok(Json(detect_alerts(&records, &thresholds)))
}

/// GET /disk-full-prediction: `{pool_id: "YYYY-MM-DD"}` from the newest records in the window.
/// Hosts without a forecast (nothing used yet) are left out.
pub(super) async fn disk_full_prediction(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<i64, String>>> {
    let window = state.config.analysis.prediction_window;
    let recent = state.repo.recent_server_resources(window).await?;
    let predictions = predict_disk_full(&latest_per_host(&recent), window);
    Ok(Json(
        predictions
            .into_iter()
            .map(|(pool_id, p)| (pool_id, p.predicted_at.format("%Y-%m-%d").to_string()))
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub(super) struct DateRange {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

impl DateRange {
    /// `[start 00:00, end+1 00:00)` in UTC when both dates are given; both end days inclusive.
    fn resolve(&self) -> ApiResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let (Some(start), Some(end)) = (self.start_date.as_deref(), self.end_date.as_deref())
        else {
            return Ok(None);
        };
        if start.is_empty() || end.is_empty() {
            return Ok(None);
        }
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest("Invalid start date".into()))?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest("Invalid end date".into()))?;
        let from = start.and_time(chrono::NaiveTime::MIN).and_utc();
        let to = end
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(TimeDelta::days(1))
            .ok_or_else(|| ApiError::BadRequest("Invalid end date".into()))?;
        Ok(Some((from, to)))
    }
}

/// GET /server-resources?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
pub(super) async fn server_resources(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Vec<ServerResource>>> {
    let range = range.resolve()?;
    Ok(Json(state.repo.list_server_resources(range).await?))
}

/// POST /insert-server-resource
pub(super) async fn insert_server_resource(
    State(state): State<AppState>,
    Json(resource): Json<NewServerResource>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = state.repo.insert_server_resource(&resource).await?;
    Ok(Json(serde_json::json!({ "status": "success", "id": id })))
}

/// GET /cluster-groups
pub(super) async fn cluster_groups(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ClusterGroup>>> {
    Ok(Json(state.repo.list_cluster_groups().await?))
}
