//! Higher-order patterns assembled from flags and raw fields.
//!
//! Each catalogue entry accumulates points from weighted indicators, clips the
//! total to 100 and only emits when the pattern's floor is reached.

mod assessment;
mod catalogue;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::FieldSet;
use super::flags::{Flag, RuleId, Severity};

pub use assessment::{litigation_score, overall_confidence, severity_weight, PatternAnalysis};

const MAX_CONFIDENCE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternKind {
    ZombieDebt,
    SystematicReaging,
    BalanceInflation,
    PhantomDebt,
    CollectionStacking,
    StatusManipulation,
    StaleReporting,
}

impl PatternKind {
    pub const fn all() -> [Self; 7] {
        [
            Self::ZombieDebt,
            Self::SystematicReaging,
            Self::BalanceInflation,
            Self::PhantomDebt,
            Self::CollectionStacking,
            Self::StatusManipulation,
            Self::StaleReporting,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::ZombieDebt => "ZOMBIE_DEBT",
            Self::SystematicReaging => "SYSTEMATIC_REAGING",
            Self::BalanceInflation => "BALANCE_INFLATION",
            Self::PhantomDebt => "PHANTOM_DEBT",
            Self::CollectionStacking => "COLLECTION_STACKING",
            Self::StatusManipulation => "STATUS_MANIPULATION",
            Self::StaleReporting => "STALE_REPORTING",
        }
    }

    /// Minimum clipped score required before the pattern is emitted.
    pub const fn floor(self) -> u32 {
        match self {
            Self::ZombieDebt | Self::SystematicReaging | Self::CollectionStacking => 30,
            Self::BalanceInflation
            | Self::PhantomDebt
            | Self::StatusManipulation
            | Self::StaleReporting => 25,
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::ZombieDebt | Self::SystematicReaging => Severity::Critical,
            Self::BalanceInflation | Self::PhantomDebt | Self::CollectionStacking => {
                Severity::High
            }
            Self::StatusManipulation | Self::StaleReporting => Severity::Medium,
        }
    }
}

/// One emitted pattern instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub kind: PatternKind,
    pub name: String,
    pub description: String,
    pub confidence: u8,
    pub severity: Severity,
    pub evidence: Vec<String>,
    pub legal_basis: Vec<String>,
    pub matched_rules: Vec<RuleId>,
    pub recommendation: String,
}

/// Running total for one pattern's indicators.
#[derive(Debug, Default)]
pub(crate) struct IndicatorTally {
    score: u32,
    evidence: Vec<String>,
    matched_rules: Vec<RuleId>,
}

impl IndicatorTally {
    pub(crate) fn add(&mut self, points: u32, evidence: String) {
        self.score += points;
        self.evidence.push(evidence);
    }

    /// Credit `points` when `rule` fired, quoting the first matching flag.
    pub(crate) fn rule(&mut self, flags: &[Flag], rule: RuleId, points: u32) {
        if let Some(flag) = flags.iter().find(|flag| flag.rule_id == rule) {
            self.score += points;
            self.evidence
                .push(format!("[{}] {}: {}", rule, flag.rule_name, flag.explanation));
            self.matched_rules.push(rule);
        }
    }

    pub(crate) fn clipped(&self) -> u32 {
        self.score.min(MAX_CONFIDENCE)
    }
}

pub(crate) struct PatternContext<'a> {
    pub(crate) fields: &'a FieldSet,
    pub(crate) flags: &'a [Flag],
    pub(crate) today: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, fields: &FieldSet, flags: &[Flag], today: NaiveDate) -> Vec<Pattern> {
        let context = PatternContext {
            fields,
            flags,
            today,
        };

        let mut patterns: Vec<Pattern> = PatternKind::all()
            .into_iter()
            .filter_map(|kind| {
                let tally = catalogue::tally(kind, &context);
                let confidence = tally.clipped();
                if confidence < kind.floor() {
                    return None;
                }
                debug!(pattern = kind.code(), confidence, "pattern emitted");
                Some(catalogue::build_pattern(kind, confidence as u8, tally))
            })
            .collect();

        patterns.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.confidence.cmp(&a.confidence))
                .then(a.kind.cmp(&b.kind))
        });
        patterns
    }

    /// Detect patterns and compute the aggregate assessment in one pass.
    pub fn analyze(&self, fields: &FieldSet, flags: &[Flag], today: NaiveDate) -> PatternAnalysis {
        let patterns = self.detect(fields, flags, today);
        PatternAnalysis::from_patterns(patterns, flags)
    }
}

pub fn detect(fields: &FieldSet, flags: &[Flag], today: NaiveDate) -> Vec<Pattern> {
    PatternDetector::new().detect(fields, flags, today)
}
