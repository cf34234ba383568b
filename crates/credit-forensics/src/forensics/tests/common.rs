use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::AnalysisConfig;
use crate::forensics::fields::FieldSet;
use crate::forensics::flags::{Flag, RuleId, Severity};
use crate::forensics::patterns::{Pattern, PatternKind};
use crate::forensics::repository::{
    AnalysisId, AnalysisRecord, AnalysisRepository, RepositoryError,
};
use crate::forensics::rules::{self, FlagBuilder};
use crate::forensics::service::ForensicService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Fixed evaluation date shared by the engine tests.
pub(super) fn today() -> NaiveDate {
    date(2024, 6, 15)
}

/// Build a field set from camelCase keys, exactly as the HTTP layer would.
pub(super) fn fields(pairs: &[(&str, &str)]) -> FieldSet {
    let object: Map<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    serde_json::from_value(Value::Object(object)).expect("field set deserializes")
}

pub(super) fn evaluate(fields: &FieldSet) -> Vec<Flag> {
    rules::evaluate(fields, today())
}

pub(super) fn rule_ids(flags: &[Flag]) -> Vec<RuleId> {
    let mut ids: Vec<RuleId> = flags.iter().map(|flag| flag.rule_id).collect();
    ids.sort();
    ids
}

pub(super) fn count_rule(flags: &[Flag], rule: RuleId) -> usize {
    flags.iter().filter(|flag| flag.rule_id == rule).count()
}

/// A catalogue-backed flag with a placeholder explanation.
pub(super) fn flag(rule: RuleId) -> Flag {
    FlagBuilder::new(rule, format!("{rule} fixture")).build()
}

pub(super) fn flag_with_severity(rule: RuleId, severity: Severity) -> Flag {
    let mut flag = flag(rule);
    flag.severity = severity;
    flag
}

pub(super) fn severity_flags(high: usize, medium: usize, low: usize) -> Vec<Flag> {
    std::iter::repeat_with(|| flag_with_severity(RuleId::PaidWithBalance, Severity::High))
        .take(high)
        .chain(
            std::iter::repeat_with(|| {
                flag_with_severity(RuleId::BalanceInflation, Severity::Medium)
            })
            .take(medium),
        )
        .chain(
            std::iter::repeat_with(|| flag_with_severity(RuleId::MissingDofd, Severity::Low))
                .take(low),
        )
        .collect()
}

pub(super) fn pattern(kind: PatternKind, confidence: u8) -> Pattern {
    Pattern {
        kind,
        name: kind.code().to_string(),
        description: String::new(),
        confidence,
        severity: kind.severity(),
        evidence: Vec::new(),
        legal_basis: Vec::new(),
        matched_rules: Vec::new(),
        recommendation: String::new(),
    }
}

/// Collection account well past every reporting and limitations window.
pub(super) fn zombie_collection() -> FieldSet {
    fields(&[
        ("creditorName", "First National Bank"),
        ("furnisherName", "Midland Credit Management"),
        ("accountType", "Collection"),
        ("accountStatus", "Collection account"),
        ("currentBalance", "2400"),
        ("originalAmount", "1200"),
        ("dateOpened", "2009-03-01"),
        ("dofd", "2012-01-01"),
        ("lastPaymentDate", "2011-06-01"),
        ("dateLastReported", "2024-05-01"),
        ("stateCode", "TX"),
    ])
}

pub(super) fn build_service(
    config: AnalysisConfig,
) -> (ForensicService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ForensicService::new(repository.clone(), config);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<AnalysisRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
