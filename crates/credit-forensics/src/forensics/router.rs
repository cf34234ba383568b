use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::repository::{AnalysisId, AnalysisRepository, RepositoryError};
use super::service::{AnalysisRequest, AnalysisServiceError, ForensicService, ReconcileRequest};

/// HTTP endpoints for analyses, reconciliation and jurisdiction lookups.
pub fn forensic_router<R>(service: Arc<ForensicService<R>>) -> Router
where
    R: AnalysisRepository + 'static,
{
    Router::new()
        .route("/api/v1/forensics/analyses", post(analyze_handler::<R>))
        .route(
            "/api/v1/forensics/analyses/:analysis_id",
            get(analysis_handler::<R>),
        )
        .route("/api/v1/forensics/reconcile", post(reconcile_handler::<R>))
        .route(
            "/api/v1/forensics/jurisdictions/:state_code",
            get(jurisdiction_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<ForensicService<R>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.analyze(request, today) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<R>(
    State(service): State<Arc<ForensicService<R>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let id = AnalysisId(analysis_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AnalysisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "analysis not found",
                "analysisId": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reconcile_handler<R>(
    State(service): State<Arc<ForensicService<R>>>,
    axum::Json(request): axum::Json<ReconcileRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.reconcile(&request, today) {
        Ok(comparisons) => {
            let payload = json!({
                "comparisons": comparisons,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn jurisdiction_handler<R>(
    State(service): State<Arc<ForensicService<R>>>,
    Path(state_code): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.jurisdiction(&state_code) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AnalysisServiceError) -> Response {
    let status = match &error {
        AnalysisServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AnalysisServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AnalysisServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
