// Host inventory handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::mock_data;
use crate::models::HostPool;

/// GET /get_hosts_pool_detail: every host with its applications.
pub(super) async fn hosts_pool_detail(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HostPool>>> {
    Ok(Json(state.repo.list_hosts().await?))
}

/// GET /get_host_detail/{id}
pub(super) async fn host_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<HostPool>> {
    state
        .repo
        .get_host(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Host not found".into()))
}

#[derive(Debug, Deserialize)]
pub(super) struct CollectParams {
    seed: Option<u64>,
}

/// POST /collect_applications: replaces the inventory with freshly generated demo data.
pub(super) async fn collect_applications(
    State(state): State<AppState>,
    Query(params): Query<CollectParams>,
) -> ApiResult<Json<serde_json::Value>> {
    let seed = params
        .seed
        .or(state.config.mock_data.seed)
        .unwrap_or_else(mock_data::random_seed);
    let dataset = mock_data::generate(seed, chrono::Utc::now());
    state.repo.replace_with_dataset(&dataset).await?;
    tracing::info!(seed, "mock data regenerated");
    Ok(Json(serde_json::json!({
        "message": "Mock data generated successfully",
        "seed": seed,
    })))
}
