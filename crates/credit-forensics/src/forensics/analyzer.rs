use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::countdown::{self, CountdownOptions, DeadlineTracker};
use super::fields::FieldSet;
use super::flags::Flag;
use super::jurisdiction::{self, DebtInstrument, JurisdictionProfile};
use super::patterns::{PatternAnalysis, PatternDetector};
use super::risk::{RiskProfile, RiskScorer};
use super::rules::RuleEngine;
use super::simulation::{AdversarialSimulator, ScoreImpactSimulator, ScoreSimulationResult, SimulationResult};
use crate::config::AnalysisConfig;

/// Caller context for one analysis beyond the tradeline itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    #[serde(default)]
    pub dispute_filed: Option<NaiveDate>,
    #[serde(default)]
    pub validation_notice_received: Option<NaiveDate>,
    #[serde(default)]
    pub instrument: Option<DebtInstrument>,
    /// Overrides the tradeline's own state code when present.
    #[serde(default)]
    pub state_code: Option<String>,
}

/// Every derived view of one tradeline, computed against a single "today".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicReport {
    pub evaluated_on: NaiveDate,
    pub fields: FieldSet,
    pub flags: Vec<Flag>,
    pub risk: RiskProfile,
    pub patterns: PatternAnalysis,
    pub deadlines: DeadlineTracker,
    pub adversarial: SimulationResult,
    pub score_impact: ScoreSimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionProfile>,
}

impl ForensicReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} flag(s), risk {} ({}), {} pattern(s)",
            self.fields.creditor_label(),
            self.flags.len(),
            self.risk.overall_score,
            self.risk.risk_level.label(),
            self.patterns.patterns.len()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ForensicAnalyzer {
    config: AnalysisConfig,
    rules: RuleEngine,
    scorer: RiskScorer,
    detector: PatternDetector,
    adversarial: AdversarialSimulator,
    score_impact: ScoreImpactSimulator,
}

impl ForensicAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        fields: &FieldSet,
        options: &AnalysisOptions,
        today: NaiveDate,
    ) -> ForensicReport {
        let mut fields = fields.clone();
        if let Some(state) = options
            .state_code
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
        {
            fields.state_code = Some(state.to_string());
        }

        let flags = self.rules.evaluate(&fields, today);
        let risk = self.scorer.score(&flags, &fields);
        let patterns = self.detector.analyze(&fields, &flags, today);
        let deadlines = countdown::build_tracker(
            &fields,
            &CountdownOptions {
                dispute_filed: options.dispute_filed,
                validation_notice_received: options.validation_notice_received,
                instrument: options.instrument.unwrap_or(self.config.default_instrument),
            },
            today,
        );
        let adversarial = self.adversarial.simulate(&flags, &risk);
        let score_impact = self.score_impact.simulate(&flags, &fields, Some(&risk));
        let jurisdiction = fields
            .state_code()
            .map(|code| *jurisdiction::lookup(&code));

        info!(
            creditor = fields.creditor_label(),
            flags = flags.len(),
            score = risk.overall_score,
            risk_level = risk.risk_level.label(),
            patterns = patterns.patterns.len(),
            "forensic analysis complete"
        );

        ForensicReport {
            evaluated_on: today,
            fields,
            flags,
            risk,
            patterns,
            deadlines,
            adversarial,
            score_impact,
            jurisdiction,
        }
    }
}
