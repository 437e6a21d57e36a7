use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::PermitKind;
use super::facts::RawProjectDetails;
use super::repository::{PermitStore, ProjectId, StoreError};
use super::service::{DeterminationServiceError, PermitDeterminationService};

/// Router builder exposing permit evaluation and per-project tracking.
pub fn permit_router<S>(service: Arc<PermitDeterminationService<S>>) -> Router
where
    S: PermitStore + 'static,
{
    Router::new()
        .route("/api/v1/permits/evaluate", post(evaluate_handler::<S>))
        .route(
            "/api/v1/projects/:project_id/permits",
            get(current_handler::<S>).put(determine_handler::<S>),
        )
        .route(
            "/api/v1/projects/:project_id/permits/:permit/explanation",
            get(explain_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<PermitDeterminationService<S>>>,
    axum::Json(details): axum::Json<RawProjectDetails>,
) -> Response
where
    S: PermitStore + 'static,
{
    match service.engine().evaluate(&details) {
        Ok(determination) => (StatusCode::OK, axum::Json(determination)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn determine_handler<S>(
    State(service): State<Arc<PermitDeterminationService<S>>>,
    Path(project_id): Path<String>,
    axum::Json(details): axum::Json<RawProjectDetails>,
) -> Response
where
    S: PermitStore + 'static,
{
    let id = ProjectId(project_id);
    match service.determine(&id, &details) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(DeterminationServiceError::Configuration(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn current_handler<S>(
    State(service): State<Arc<PermitDeterminationService<S>>>,
    Path(project_id): Path<String>,
) -> Response
where
    S: PermitStore + 'static,
{
    let id = ProjectId(project_id);
    match service.current(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(DeterminationServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "project_id": id.0,
                "error": "no permit determination recorded",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn explain_handler<S>(
    State(service): State<Arc<PermitDeterminationService<S>>>,
    Path((project_id, permit)): Path<(String, String)>,
) -> Response
where
    S: PermitStore + 'static,
{
    let Some(kind) = PermitKind::parse(&permit) else {
        let payload = json!({ "error": format!("unknown permit '{permit}'") });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let id = ProjectId(project_id);
    match service.explain(&id, kind) {
        Ok(Some(rationale)) => {
            let payload = json!({ "permit": kind, "rationale": rationale });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) | Err(DeterminationServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "permit": kind,
                "error": "permit not required for this project",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
