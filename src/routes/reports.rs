// Report handlers: JSON summaries and the HTML usage report

use axum::{Json, extract::State, response::Html};

use super::AppState;
use crate::error::ApiResult;
use crate::models::AggregateUsage;
use crate::report::{self, GroupReport};

pub(super) async fn cluster_group_report(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<GroupReport>>> {
    let groups = state.repo.list_cluster_groups().await?;
    let records = state.repo.list_server_resources(None).await?;
    Ok(Json(report::cluster_group_report(
        &groups,
        &records,
        state.config.analysis.prediction_window,
    )))
}

pub(super) async fn idc_report(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AggregateUsage>>> {
    let records = state.repo.list_server_resources(None).await?;
    Ok(Json(report::idc_report(&records)))
}

/// GET /resource-report: alerts, group averages and per-server usage as one HTML page.
pub(super) async fn resource_report(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let records = state.repo.list_server_resources(None).await?;
    let groups = state.repo.list_cluster_groups().await?;
    Ok(Html(report::render_html_report(
        &records,
        &groups,
        &state.config.analysis.thresholds(),
    )))
}
