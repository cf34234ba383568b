use serde::{Deserialize, Serialize};

use super::fields::FieldSet;
use super::flags::{Flag, RuleId, Severity};

pub const MAX_RISK_SCORE: u32 = 100;

const RE_AGING_PATTERN_NAME: &str = "Debt Re-Aging";
const RE_AGING_MIN_MATCHES: usize = 2;
const LITIGATION_SCORE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn from_score(score: u32) -> Self {
        if score >= 75 {
            Self::Critical
        } else if score >= 50 {
            Self::High
        } else if score >= 25 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisputeStrength {
    Weak,
    Moderate,
    Strong,
    Definitive,
}

impl DisputeStrength {
    pub const fn from_score(score: u32) -> Self {
        match RiskLevel::from_score(score) {
            RiskLevel::Critical => Self::Definitive,
            RiskLevel::High => Self::Strong,
            RiskLevel::Medium => Self::Moderate,
            RiskLevel::Low => Self::Weak,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Definitive => "definitive",
        }
    }
}

/// Sub-pattern recognised directly by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPattern {
    pub name: String,
    pub confidence: u8,
    pub matched_rules: Vec<RuleId>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub overall_score: u8,
    pub risk_level: RiskLevel,
    pub dispute_strength: DisputeStrength,
    pub litigation_potential: bool,
    pub detected_patterns: Vec<DetectedPattern>,
    pub key_violations: Vec<String>,
    pub recommended_approach: String,
}

impl RiskProfile {
    pub fn score(&self) -> u32 {
        u32::from(self.overall_score)
    }
}

/// Points contributed by a single flag.
pub const fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 35,
        Severity::High => 25,
        Severity::Medium => 15,
        Severity::Low => 5,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, flags: &[Flag], fields: &FieldSet) -> RiskProfile {
        let raw: u32 = flags.iter().map(|flag| severity_points(flag.severity)).sum();
        let overall_score = raw.min(MAX_RISK_SCORE);

        let re_aging = re_aging_pattern(flags, fields);
        let re_aging_matches = re_aging
            .as_ref()
            .map(|pattern| pattern.matched_rules.len())
            .unwrap_or(0);

        let litigation_potential = overall_score >= LITIGATION_SCORE_THRESHOLD
            || re_aging_matches >= RE_AGING_MIN_MATCHES;

        RiskProfile {
            overall_score: overall_score as u8,
            risk_level: RiskLevel::from_score(overall_score),
            dispute_strength: DisputeStrength::from_score(overall_score),
            litigation_potential,
            detected_patterns: re_aging.into_iter().collect(),
            key_violations: key_violations(flags),
            recommended_approach: recommended_approach(overall_score).to_string(),
        }
    }
}

pub fn score(flags: &[Flag], fields: &FieldSet) -> RiskProfile {
    RiskScorer::new().score(flags, fields)
}

fn re_aging_pattern(flags: &[Flag], fields: &FieldSet) -> Option<DetectedPattern> {
    let mut matched_rules: Vec<RuleId> = flags
        .iter()
        .map(|flag| flag.rule_id)
        .filter(|rule| rule.is_timeline())
        .collect();
    matched_rules.sort();
    matched_rules.dedup();

    if matched_rules.len() < RE_AGING_MIN_MATCHES {
        return None;
    }

    let confidence = (60 + 15 * matched_rules.len()).min(95) as u8;
    let codes: Vec<&str> = matched_rules.iter().map(|rule| rule.code()).collect();
    let description = format!(
        "{} independent timeline defects ({}) around the reported date of first delinquency {} indicate the reporting clock was reset.",
        matched_rules.len(),
        codes.join(", "),
        fields.dofd.as_deref().unwrap_or("(not reported)"),
    );

    Some(DetectedPattern {
        name: RE_AGING_PATTERN_NAME.to_string(),
        confidence,
        matched_rules,
        description,
    })
}

/// Distinct rule names, most severe first.
fn key_violations(flags: &[Flag]) -> Vec<String> {
    let mut ordered: Vec<&Flag> = flags.iter().collect();
    ordered.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.rule_id.cmp(&b.rule_id)));

    let mut names: Vec<String> = Vec::new();
    for flag in ordered {
        if !names.contains(&flag.rule_name) {
            names.push(flag.rule_name.clone());
        }
    }
    names
}

fn recommended_approach(score: u32) -> &'static str {
    match RiskLevel::from_score(score) {
        RiskLevel::Critical => {
            "Send certified disputes to every reporting bureau and a direct dispute to the furnisher, citing each violation with its supporting documents. Preserve all correspondence: the violations are documented well enough to support a complaint to the CFPB and a consultation with a consumer-protection attorney if the items are verified without correction."
        }
        RiskLevel::High => {
            "File detailed written disputes with each bureau reporting the account, attaching the evidence listed for every high-severity finding. Request the method of verification if the items are confirmed, and escalate to a regulator complaint if the response does not address the specific inaccuracies."
        }
        RiskLevel::Medium => {
            "Dispute the specific inaccuracies with the bureaus and request debt validation from the collector. Gather the suggested documents before filing so each claim is backed by evidence."
        }
        RiskLevel::Low => {
            "Keep monitoring the report. The findings are minor; a targeted dispute of any single inaccuracy is optional and can be combined with a routine annual review."
        }
    }
}
