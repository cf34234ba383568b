//! Credit report forensics engine.
//!
//! Leaf to root: [`fields`] models one tradeline, [`rules`] turns it into
//! [`Flag`]s, [`patterns`] and [`risk`] aggregate those flags, and
//! [`countdown`], [`reconcile`] and [`simulation`] derive deadlines,
//! cross-bureau discrepancies and projected outcomes. [`analyzer`] runs the
//! whole pipeline for one account; [`service`] and [`router`] put it behind a
//! repository and HTTP.

pub mod analyzer;
pub mod countdown;
pub mod dates;
pub mod fields;
pub mod flags;
pub mod import;
pub mod jurisdiction;
pub mod patterns;
pub mod reconcile;
pub mod repository;
pub mod risk;
pub mod router;
pub mod rules;
pub mod service;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use analyzer::{AnalysisOptions, ForensicAnalyzer, ForensicReport};
pub use countdown::{
    Countdown, CountdownKind, CountdownOptions, DeadlineTracker, Milestone, Urgency,
};
pub use fields::{DateField, FieldSet};
pub use flags::{EvidenceValue, Flag, FlagCategory, RuleId, Severity};
pub use import::{BureauAccounts, TradelineImportError, TradelineImporter};
pub use jurisdiction::{DebtInstrument, JurisdictionProfile};
pub use patterns::{Pattern, PatternAnalysis, PatternDetector, PatternKind};
pub use reconcile::{
    Bureau, BureauComparison, BureauReconciler, ComparisonField, ComparisonRisk, Discrepancy,
    DiscrepancySeverity,
};
pub use repository::{AnalysisId, AnalysisRecord, AnalysisRepository, RepositoryError};
pub use risk::{DetectedPattern, DisputeStrength, RiskLevel, RiskProfile, RiskScorer};
pub use router::forensic_router;
pub use rules::RuleEngine;
pub use service::{
    AnalysisRequest, AnalysisServiceError, ForensicService, ReconcileRequest, RequestError,
};
pub use simulation::{
    AdversarialSimulator, DecisionNode, DecisionOutcome, DisputeTactic, ScoreImpactSimulator,
    ScoreSimulationResult, SimulationResult,
};
