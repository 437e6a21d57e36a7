use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use permit_engine::workflows::permits::{
    permit_router, PermitDeterminationService, PermitStore, WorkflowTrack,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_permit_routes<S>(service: Arc<PermitDeterminationService<S>>) -> axum::Router
where
    S: PermitStore + 'static,
{
    permit_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/tracks", axum::routing::get(tracks_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Track picker options in presentation order.
pub(crate) async fn tracks_endpoint() -> Json<serde_json::Value> {
    let tracks: Vec<serde_json::Value> = WorkflowTrack::ordered()
        .into_iter()
        .map(|track| {
            json!({
                "id": track.id(),
                "label": track.label(),
                "base_permit": track.base_permit(),
            })
        })
        .collect();
    Json(json!({ "tracks": tracks }))
}
