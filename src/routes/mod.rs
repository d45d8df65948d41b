// HTTP routes under /api/cmdb/v1

mod hosts;
mod http;
mod reports;
mod resources;

use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::cmdb_repo::CmdbRepo;
use crate::config::AppConfig;

pub const API_PREFIX: &str = "/api/cmdb/v1";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<CmdbRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(repo: Arc<CmdbRepo>, config: AppConfig) -> Router {
    let cors = cors_layer(&config.server.cors_allowed_origins);
    let state = AppState { repo, config };
    let api = Router::new()
        .route("/get_hosts_pool_detail", get(hosts::hosts_pool_detail))
        .route("/get_host_detail/{id}", get(hosts::host_detail))
        .route("/collect_applications", post(hosts::collect_applications))
        .route("/get_cluster_usage", get(resources::cluster_usage))
        .route("/cluster-resource-usage", get(resources::cluster_resource_usage))
        .route("/resource-alerts", get(resources::resource_alerts))
        .route("/disk-full-prediction", get(resources::disk_full_prediction))
        .route("/server-resources", get(resources::server_resources))
        .route("/insert-server-resource", post(resources::insert_server_resource))
        .route("/cluster-groups", get(resources::cluster_groups))
        .route("/cluster-group-report", get(reports::cluster_group_report))
        .route("/idc-report", get(reports::idc_report))
        .route("/resource-report", get(reports::resource_report));

    Router::new()
        .route("/", get(|| async { "cmdb: inventory and resource usage API" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .nest(API_PREFIX, api)
        .layer(cors)
        .with_state(state)
}

/// Any origin when none are configured; origins were validated at config load.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let list: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(list))
}
