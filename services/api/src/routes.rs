use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use credit_forensics::error::AppError;
use credit_forensics::forensics::{
    forensic_router, AnalysisRepository, BureauAccounts, BureauComparison, ForensicService,
    ReconcileRequest, TradelineImporter,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportResponse {
    pub(crate) evaluated_on: NaiveDate,
    pub(crate) imported: usize,
    pub(crate) unassigned: usize,
    pub(crate) comparisons: Vec<BureauComparison>,
}

pub(crate) fn with_forensic_routes<R>(service: Arc<ForensicService<R>>) -> Router
where
    R: AnalysisRepository + 'static,
{
    let import = Router::new()
        .route("/api/v1/forensics/import", post(import_endpoint::<R>))
        .with_state(service.clone());

    forensic_router(service)
        .merge(import)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Reconciles a raw tradeline CSV export in one request.
pub(crate) async fn import_endpoint<R>(
    State(service): State<Arc<ForensicService<R>>>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError>
where
    R: AnalysisRepository + 'static,
{
    let ImportRequest { csv, as_of } = payload;

    let accounts = TradelineImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let imported = accounts.len();
    let BureauAccounts {
        experian,
        equifax,
        transunion,
        unassigned,
    } = BureauAccounts::partition(accounts);

    if experian.is_empty() && equifax.is_empty() && transunion.is_empty() {
        return Err(AppError::Input(
            "no imported row names Experian, Equifax or TransUnion".to_string(),
        ));
    }

    let evaluated_on = as_of.unwrap_or_else(|| Local::now().date_naive());
    let request = ReconcileRequest {
        experian,
        equifax,
        transunion,
        as_of: Some(evaluated_on),
    };
    let comparisons = service.reconcile(&request, evaluated_on)?;

    info!(
        imported,
        unassigned = unassigned.len(),
        comparisons = comparisons.len(),
        "tradeline import reconciled"
    );

    Ok(Json(ImportResponse {
        evaluated_on,
        imported,
        unassigned: unassigned.len(),
        comparisons,
    }))
}
