//! Projects how removing flagged items could move a FICO-style score.

use serde::{Deserialize, Serialize};

use super::financing::{financial_benefits, FinancialBenefit};
use crate::forensics::fields::FieldSet;
use crate::forensics::flags::{Flag, FlagCategory, RuleId, Severity};
use crate::forensics::risk::{RiskLevel, RiskProfile};

pub const MIN_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 850;
const DEFAULT_BASE_SCORE: i32 = 650;
const HIGH_FLAG_PENALTY: i32 = 15;
const MEDIUM_FLAG_PENALTY: i32 = 5;
const TIMELINE_MONTHS: u8 = 12;

const MILESTONES: [(u8, &str); 6] = [
    (0, "Disputes filed"),
    (1, "Bureau investigations complete"),
    (2, "First deletions reflected"),
    (3, "Corrections posted by furnishers"),
    (6, "Scoring models recalculate"),
    (12, "Full projected recovery"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalSimulation {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub points_low: u16,
    pub points_mid: u16,
    pub points_high: u16,
    pub confidence: RemovalConfidence,
    pub time_to_reflect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedScores {
    pub optimistic: u16,
    pub realistic: u16,
    pub conservative: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFactor {
    PaymentHistory,
    AmountsOwed,
    LengthOfHistory,
    CreditMix,
    NewCredit,
}

impl CreditFactor {
    pub const fn all() -> [Self; 5] {
        [
            Self::PaymentHistory,
            Self::AmountsOwed,
            Self::LengthOfHistory,
            Self::CreditMix,
            Self::NewCredit,
        ]
    }

    /// Share of a FICO score attributed to the factor, in percent.
    pub const fn weight(self) -> u8 {
        match self {
            Self::PaymentHistory => 35,
            Self::AmountsOwed => 30,
            Self::LengthOfHistory => 15,
            Self::CreditMix | Self::NewCredit => 10,
        }
    }

    const fn for_category(category: FlagCategory) -> Self {
        match category {
            FlagCategory::Balance => Self::AmountsOwed,
            FlagCategory::Timeline => Self::LengthOfHistory,
            FlagCategory::Medical
            | FlagCategory::MissingData
            | FlagCategory::Consistency
            | FlagCategory::Jurisdiction => Self::PaymentHistory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImpact {
    pub factor: CreditFactor,
    pub weight_percent: u8,
    pub affected_items: usize,
    pub projected_improvement: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub month: u8,
    pub score: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSimulationResult {
    pub current_score: u16,
    pub current_range: String,
    pub projected: ProjectedScores,
    pub removals: Vec<RemovalSimulation>,
    pub category_impacts: Vec<CategoryImpact>,
    pub financial_benefits: Vec<FinancialBenefit>,
    pub timeline: Vec<TimelinePoint>,
}

pub fn score_range(score: u16) -> &'static str {
    if score >= 800 {
        "Exceptional"
    } else if score >= 740 {
        "Very Good"
    } else if score >= 670 {
        "Good"
    } else if score >= 580 {
        "Fair"
    } else {
        "Poor"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreImpactSimulator;

impl ScoreImpactSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Without a risk profile the estimate starts from a neutral 650.
    pub fn simulate(
        &self,
        flags: &[Flag],
        fields: &FieldSet,
        risk: Option<&RiskProfile>,
    ) -> ScoreSimulationResult {
        let current_score = estimate_current_score(flags, risk);
        let multiplier = band_multiplier(current_score);
        let removals: Vec<RemovalSimulation> = flags
            .iter()
            .map(|flag| removal_simulation(flag, multiplier))
            .collect();

        let total_mid: f64 = removals
            .iter()
            .map(|removal| f64::from(removal.points_mid))
            .sum();
        let project = |factor: f64| clamp_score(f64::from(current_score) + total_mid * factor);
        let projected = ProjectedScores {
            optimistic: project(1.2),
            realistic: project(0.8),
            conservative: project(0.5),
        };

        let category_impacts = category_impacts(flags, &removals);
        let financial_benefits = financial_benefits(current_score, projected.realistic);
        let timeline = recovery_timeline(current_score, projected.realistic);

        tracing::debug!(
            creditor = fields.creditor_label(),
            current_score,
            realistic = projected.realistic,
            "score impact simulated"
        );

        ScoreSimulationResult {
            current_score,
            current_range: score_range(current_score).to_string(),
            projected,
            removals,
            category_impacts,
            financial_benefits,
            timeline,
        }
    }
}

pub fn simulate(
    flags: &[Flag],
    fields: &FieldSet,
    risk: Option<&RiskProfile>,
) -> ScoreSimulationResult {
    ScoreImpactSimulator::new().simulate(flags, fields, risk)
}

fn base_score(risk: Option<&RiskProfile>) -> i32 {
    match risk.map(|profile| profile.risk_level) {
        Some(RiskLevel::Critical) => 520,
        Some(RiskLevel::High) => 580,
        Some(RiskLevel::Medium) => 620,
        Some(RiskLevel::Low) => 680,
        None => DEFAULT_BASE_SCORE,
    }
}

pub fn estimate_current_score(flags: &[Flag], risk: Option<&RiskProfile>) -> u16 {
    let penalty: i32 = flags
        .iter()
        .map(|flag| match flag.severity {
            Severity::High | Severity::Critical => HIGH_FLAG_PENALTY,
            Severity::Medium => MEDIUM_FLAG_PENALTY,
            Severity::Low => 0,
        })
        .sum();
    (base_score(risk) - penalty).clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u16
}

fn band_multiplier(score: u16) -> f64 {
    if score < 600 {
        1.3
    } else if score < 700 {
        1.0
    } else {
        0.7
    }
}

fn removal_simulation(flag: &Flag, multiplier: f64) -> RemovalSimulation {
    let (base, confidence, time_to_reflect) = if flag.rule_id.is_timeline() {
        (45.0, RemovalConfidence::High, "30-45 days")
    } else {
        match flag.severity {
            Severity::High | Severity::Critical => (35.0, RemovalConfidence::Medium, "30-60 days"),
            Severity::Medium => (20.0, RemovalConfidence::Medium, "45-60 days"),
            Severity::Low => (10.0, RemovalConfidence::Low, "60-90 days"),
        }
    };
    let adjusted = base * multiplier;
    let points = |factor: f64| (adjusted * factor).round() as u16;

    RemovalSimulation {
        rule_id: flag.rule_id,
        rule_name: flag.rule_name.clone(),
        points_low: points(0.5),
        points_mid: points(0.8),
        points_high: points(1.2),
        confidence,
        time_to_reflect: time_to_reflect.to_string(),
    }
}

fn category_impacts(flags: &[Flag], removals: &[RemovalSimulation]) -> Vec<CategoryImpact> {
    CreditFactor::all()
        .into_iter()
        .map(|factor| {
            let (affected_items, projected_improvement) = flags
                .iter()
                .zip(removals)
                .filter(|(flag, _)| CreditFactor::for_category(flag.category) == factor)
                .fold((0usize, 0u16), |(count, points), (_, removal)| {
                    (count + 1, points.saturating_add(removal.points_mid))
                });
            CategoryImpact {
                factor,
                weight_percent: factor.weight(),
                affected_items,
                projected_improvement,
            }
        })
        .collect()
}

/// Logarithmic recovery: most of the gain lands in the first months.
fn recovery_timeline(current: u16, projected: u16) -> Vec<TimelinePoint> {
    let delta = f64::from(projected) - f64::from(current);
    let horizon = f64::from(TIMELINE_MONTHS + 1).ln();

    (0..=TIMELINE_MONTHS)
        .map(|month| {
            let progress = f64::from(month + 1).ln() / horizon;
            TimelinePoint {
                month,
                score: clamp_score(f64::from(current) + delta * progress),
                milestone: MILESTONES
                    .iter()
                    .find(|(at, _)| *at == month)
                    .map(|(_, label)| label.to_string()),
            }
        })
        .collect()
}

fn clamp_score(value: f64) -> u16 {
    value
        .round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u16
}
