use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analyzer::{AnalysisOptions, ForensicAnalyzer};
use super::fields::FieldSet;
use super::jurisdiction::{self, JurisdictionProfile};
use super::reconcile::{Bureau, BureauComparison, BureauReconciler};
use super::repository::{AnalysisId, AnalysisRecord, AnalysisRepository, RepositoryError};
use crate::config::AnalysisConfig;

static ANALYSIS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_analysis_id() -> AnalysisId {
    let id = ANALYSIS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnalysisId(format!("analysis-{id:06}"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub fields: FieldSet,
    #[serde(default)]
    pub options: AnalysisOptions,
    /// Evaluation date; the caller's current date when absent.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    #[serde(default)]
    pub experian: Vec<FieldSet>,
    #[serde(default)]
    pub equifax: Vec<FieldSet>,
    #[serde(default)]
    pub transunion: Vec<FieldSet>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ReconcileRequest {
    fn accounts(&self, bureau: Bureau) -> &[FieldSet] {
        match bureau {
            Bureau::Experian => &self.experian,
            Bureau::Equifax => &self.equifax,
            Bureau::TransUnion => &self.transunion,
        }
    }
}

/// Shape problems in caller input, rejected before any analysis runs.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("reconciliation needs at least one account")]
    EmptyReconciliation,
    #[error("{bureau} lists {count} accounts; at most {limit} are accepted per bureau")]
    TooManyAccounts {
        bureau: Bureau,
        count: usize,
        limit: usize,
    },
    #[error("state code {0:?} must be two ASCII letters")]
    InvalidStateCode(String),
}

/// Runs analyses and keeps their reports behind an [`AnalysisRepository`].
pub struct ForensicService<R> {
    repository: Arc<R>,
    analyzer: ForensicAnalyzer,
    reconciler: BureauReconciler,
}

impl<R> ForensicService<R>
where
    R: AnalysisRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: AnalysisConfig) -> Self {
        Self {
            repository,
            analyzer: ForensicAnalyzer::new(config),
            reconciler: BureauReconciler::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.analyzer.config()
    }

    /// Analyze one tradeline and store the resulting report.
    pub fn analyze(
        &self,
        request: AnalysisRequest,
        today: NaiveDate,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        for code in [
            request.options.state_code.as_deref(),
            request.fields.state_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            validate_state_code(code)?;
        }

        let evaluated_on = request.as_of.unwrap_or(today);
        let report = self
            .analyzer
            .analyze(&request.fields, &request.options, evaluated_on);

        let record = AnalysisRecord {
            id: next_analysis_id(),
            created_on: today,
            report,
        };
        Ok(self.repository.insert(record)?)
    }

    pub fn get(&self, id: &AnalysisId) -> Result<AnalysisRecord, AnalysisServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, AnalysisServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    pub fn reconcile(
        &self,
        request: &ReconcileRequest,
        today: NaiveDate,
    ) -> Result<Vec<BureauComparison>, AnalysisServiceError> {
        let limit = self.config().max_accounts_per_bureau;
        let mut total = 0;
        for bureau in Bureau::all() {
            let count = request.accounts(bureau).len();
            if count > limit {
                return Err(RequestError::TooManyAccounts {
                    bureau,
                    count,
                    limit,
                }
                .into());
            }
            total += count;
        }
        if total == 0 {
            return Err(RequestError::EmptyReconciliation.into());
        }

        Ok(self.reconciler.compare(
            &request.experian,
            &request.equifax,
            &request.transunion,
            request.as_of.unwrap_or(today),
        ))
    }

    /// Unknown but well-formed codes resolve to the default profile.
    pub fn jurisdiction(
        &self,
        state_code: &str,
    ) -> Result<&'static JurisdictionProfile, AnalysisServiceError> {
        validate_state_code(state_code)?;
        Ok(jurisdiction::lookup(state_code))
    }
}

fn validate_state_code(code: &str) -> Result<(), RequestError> {
    let trimmed = code.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(RequestError::InvalidStateCode(code.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    Validation(#[from] RequestError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
