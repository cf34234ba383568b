use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::AnalysisConfig;
use crate::forensics::analyzer::AnalysisOptions;
use crate::forensics::flags::RuleId;
use crate::forensics::repository::{AnalysisId, RepositoryError};
use crate::forensics::risk::RiskLevel;
use crate::forensics::router::{self, forensic_router};
use crate::forensics::service::{
    AnalysisRequest, AnalysisServiceError, ForensicService, ReconcileRequest, RequestError,
};

fn zombie_request() -> AnalysisRequest {
    AnalysisRequest {
        fields: zombie_collection(),
        options: AnalysisOptions::default(),
        as_of: Some(today()),
    }
}

#[test]
fn analyze_stores_the_full_report() {
    let (service, repository) = build_service(AnalysisConfig::default());
    let record = service
        .analyze(zombie_request(), date(2024, 7, 1))
        .expect("analysis succeeds");

    assert!(record.id.0.starts_with("analysis-"));
    assert_eq!(record.created_on, date(2024, 7, 1));

    let report = &record.report;
    assert_eq!(report.evaluated_on, today());
    assert_eq!(
        rule_ids(&report.flags),
        vec![
            RuleId::ReportingLimitExceeded,
            RuleId::BalanceInflation,
            RuleId::InterestCapExceeded,
            RuleId::StatuteExpired,
        ]
    );
    assert_eq!(report.risk.overall_score, 80);
    assert_eq!(report.risk.risk_level, RiskLevel::Critical);
    assert_eq!(report.patterns.patterns.len(), 3);
    assert_eq!(report.patterns.litigation_score, 95);
    assert!(report.deadlines.countdowns.iter().all(|countdown| countdown.expired));
    assert_eq!(
        report.jurisdiction.map(|profile| profile.state_code),
        Some("TX")
    );
    assert!(report.summary().starts_with("First National Bank: 4 flag(s), risk 80"));

    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .len();
    assert_eq!(stored, 1);
}

#[test]
fn analyses_are_retrievable_by_id() {
    let (service, _) = build_service(AnalysisConfig::default());
    let record = service
        .analyze(zombie_request(), today())
        .expect("analysis succeeds");

    let fetched = service.get(&record.id).expect("record exists");
    assert_eq!(fetched.id, record.id);
    assert_eq!(fetched.report.flags, record.report.flags);
}

#[test]
fn missing_analysis_is_not_found() {
    let (service, _) = build_service(AnalysisConfig::default());
    let error = service
        .get(&AnalysisId("analysis-999999".to_string()))
        .expect_err("unknown id");
    assert!(matches!(
        error,
        AnalysisServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn recent_returns_newest_first() {
    let (service, _) = build_service(AnalysisConfig::default());
    let first = service.analyze(zombie_request(), today()).expect("first");
    let second = service.analyze(zombie_request(), today()).expect("second");
    let third = service.analyze(zombie_request(), today()).expect("third");

    let recent = service.recent(2).expect("recent succeeds");
    let ids: Vec<AnalysisId> = recent.into_iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![third.id, second.id]);
    assert_ne!(first.id, ids[1]);
}

#[test]
fn option_state_code_overrides_tradeline() {
    let (service, _) = build_service(AnalysisConfig::default());
    let request = AnalysisRequest {
        fields: fields(&[("lastPaymentDate", "2021-01-01")]),
        options: AnalysisOptions {
            state_code: Some("ca".to_string()),
            ..AnalysisOptions::default()
        },
        as_of: Some(today()),
    };
    let record = service.analyze(request, today()).expect("analysis succeeds");

    assert_eq!(record.report.fields.state_code.as_deref(), Some("ca"));
    assert_eq!(
        record.report.jurisdiction.map(|profile| profile.state_code),
        Some("CA")
    );
    assert_eq!(record.report.deadlines.countdowns[0].target_date, date(2025, 1, 1));
}

#[test]
fn malformed_state_codes_are_rejected() {
    let (service, repository) = build_service(AnalysisConfig::default());
    let request = AnalysisRequest {
        fields: fields(&[("stateCode", "Texas")]),
        ..AnalysisRequest::default()
    };
    let error = service.analyze(request, today()).expect_err("invalid state");

    assert!(matches!(
        error,
        AnalysisServiceError::Validation(RequestError::InvalidStateCode(ref code)) if code == "Texas"
    ));
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
}

#[test]
fn repository_outage_surfaces_as_error() {
    let service = ForensicService::new(Arc::new(UnavailableRepository), AnalysisConfig::default());
    let error = service
        .analyze(zombie_request(), today())
        .expect_err("repository offline");
    assert!(matches!(
        error,
        AnalysisServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[test]
fn reconcile_rejects_empty_and_oversized_requests() {
    let config = AnalysisConfig {
        max_accounts_per_bureau: 1,
        ..AnalysisConfig::default()
    };
    let (service, _) = build_service(config);

    let empty = service
        .reconcile(&ReconcileRequest::default(), today())
        .expect_err("empty request");
    assert!(matches!(
        empty,
        AnalysisServiceError::Validation(RequestError::EmptyReconciliation)
    ));

    let oversized = ReconcileRequest {
        equifax: vec![zombie_collection(), zombie_collection()],
        ..ReconcileRequest::default()
    };
    let error = service
        .reconcile(&oversized, today())
        .expect_err("too many accounts");
    assert_eq!(
        error.to_string(),
        "Equifax lists 2 accounts; at most 1 are accepted per bureau"
    );
}

#[test]
fn reconcile_compares_across_bureaus() {
    let (service, _) = build_service(AnalysisConfig::default());
    let request = ReconcileRequest {
        experian: vec![zombie_collection()],
        transunion: vec![zombie_collection()],
        as_of: Some(today()),
        ..ReconcileRequest::default()
    };
    let comparisons = service.reconcile(&request, today()).expect("reconcile succeeds");

    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].creditor_key, "firstnationalbank");
    assert!(comparisons[0].discrepancies.is_empty());
    assert_eq!(comparisons[0].flag_count(), 8);
}

#[test]
fn jurisdiction_lookup_validates_shape_only() {
    let (service, _) = build_service(AnalysisConfig::default());
    assert_eq!(service.jurisdiction("tx").expect("texas").state_code, "TX");
    assert!(service.jurisdiction("ZZ").expect("fallback").is_default());
    assert!(service.jurisdiction("T1").is_err());
}

#[tokio::test]
async fn analyze_route_returns_created() {
    let (service, _) = build_service(AnalysisConfig::default());
    let app = forensic_router(Arc::new(service));

    let response = app
        .oneshot(
            axum::http::Request::post("/api/v1/forensics/analyses")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&zombie_request()).expect("serialize request"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload["id"]
        .as_str()
        .is_some_and(|id| id.starts_with("analysis-")));
    assert_eq!(payload["report"]["risk"]["riskLevel"], "critical");
    assert_eq!(payload["report"]["flags"][0]["ruleId"], "K7");
}

#[tokio::test]
async fn analysis_handler_reports_missing_records() {
    let (service, _) = build_service(AnalysisConfig::default());
    let response = router::analysis_handler(
        State(Arc::new(service)),
        Path("analysis-424242".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "analysis not found");
    assert_eq!(payload["analysisId"], "analysis-424242");
}

#[tokio::test]
async fn analysis_handler_maps_outage_to_internal_error() {
    let service = Arc::new(ForensicService::new(
        Arc::new(UnavailableRepository),
        AnalysisConfig::default(),
    ));
    let response = router::analysis_handler::<UnavailableRepository>(
        State(service),
        Path("analysis-000001".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn reconcile_route_rejects_empty_body() {
    let (service, _) = build_service(AnalysisConfig::default());
    let app = forensic_router(Arc::new(service));

    let response = app
        .oneshot(
            axum::http::Request::post("/api/v1/forensics/reconcile")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(json!({}).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "reconciliation needs at least one account");
}

#[tokio::test]
async fn reconcile_route_wraps_comparisons() {
    let (service, _) = build_service(AnalysisConfig::default());
    let app = forensic_router(Arc::new(service));
    let body = json!({
        "experian": [{ "creditorName": "Acme Bank", "dofd": "2021-03-15" }],
        "equifax": [{ "creditorName": "Acme Bank", "dofd": "2022-09-01" }],
        "asOf": "2024-06-15",
    });

    let response = app
        .oneshot(
            axum::http::Request::post("/api/v1/forensics/reconcile")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let comparison = &payload["comparisons"][0];
    assert_eq!(comparison["risk"], "high");
    assert_eq!(comparison["discrepancies"][0]["field"], "dofd");
    assert_eq!(comparison["discrepancies"][0]["severity"], "critical");
}

#[tokio::test]
async fn jurisdiction_route_serves_profiles() {
    let (service, _) = build_service(AnalysisConfig::default());
    let app = forensic_router(Arc::new(service));

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::get("/api/v1/forensics/jurisdictions/ky")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["stateName"], "Kentucky");
    assert_eq!(payload["statuteOfLimitations"]["promissoryNote"], 15);

    let rejected = app
        .oneshot(
            axum::http::Request::get("/api/v1/forensics/jurisdictions/kentucky")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
