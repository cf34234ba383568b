use chrono::NaiveDate;
use credit_forensics::config::AnalysisConfig;
use credit_forensics::error::AppError;
use credit_forensics::forensics::{
    AnalysisId, AnalysisRecord, AnalysisRepository, DebtInstrument, FieldSet, ForensicService,
    RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct RecordStore {
    inserted: u64,
    records: HashMap<AnalysisId, (u64, AnalysisRecord)>,
}

/// Process-local analysis store. Reports are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    store: Arc<Mutex<RecordStore>>,
}

impl InMemoryAnalysisRepository {
    fn lock(&self) -> Result<MutexGuard<'_, RecordStore>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("analysis store lock poisoned".to_string()))
    }
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.records.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.inserted += 1;
        let order = guard.inserted;
        guard
            .records
            .insert(record.id.clone(), (order, record.clone()));
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.get(id).map(|(_, record)| record.clone()))
    }

    /// Newest first, by insertion order rather than id text.
    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut entries: Vec<&(u64, AnalysisRecord)> = guard.records.values().collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(entries
            .into_iter()
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

pub(crate) fn analysis_service(
    config: AnalysisConfig,
) -> ForensicService<InMemoryAnalysisRepository> {
    ForensicService::new(Arc::new(InMemoryAnalysisRepository::default()), config)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_instrument(raw: &str) -> Result<DebtInstrument, String> {
    DebtInstrument::parse(raw)
        .ok_or_else(|| format!("unknown debt instrument '{raw}' (written, oral, promissory, open)"))
}

/// Accepts either inline JSON or a path to a JSON file.
pub(crate) fn load_fields(source: &str) -> Result<FieldSet, AppError> {
    let trimmed = source.trim_start();
    let raw = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        std::fs::read_to_string(Path::new(source))?
    };
    Ok(serde_json::from_str(&raw)?)
}
