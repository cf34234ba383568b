use serde::{Deserialize, Serialize};

use super::Pattern;
use crate::forensics::flags::{count_severity, has_rule, Flag, RuleId, Severity};

const MAX_LITIGATION_SCORE: u32 = 100;

/// Patterns for one account plus the detector's aggregate view of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    pub patterns: Vec<Pattern>,
    pub overall_confidence: u8,
    pub litigation_score: u8,
    pub risk_factors: Vec<String>,
    pub assessment: String,
}

impl PatternAnalysis {
    pub fn from_patterns(patterns: Vec<Pattern>, flags: &[Flag]) -> Self {
        let overall_confidence = overall_confidence(&patterns);
        let (litigation, risk_factors) = litigation_breakdown(&patterns, flags);
        let assessment = assessment(&patterns, litigation).to_string();

        Self {
            patterns,
            overall_confidence,
            litigation_score: litigation as u8,
            risk_factors,
            assessment,
        }
    }

    pub fn critical_count(&self) -> usize {
        critical_count(&self.patterns)
    }
}

pub const fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 1.5,
        Severity::High => 1.2,
        Severity::Medium => 1.0,
        Severity::Low => 0.7,
    }
}

const fn litigation_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 30,
        Severity::High => 20,
        Severity::Medium => 10,
        Severity::Low => 5,
    }
}

/// Severity-weighted mean confidence, normalized against every pattern scoring 100.
pub fn overall_confidence(patterns: &[Pattern]) -> u8 {
    let (weighted, maximum) = patterns.iter().fold((0.0, 0.0), |(sum, max), pattern| {
        let weight = severity_weight(pattern.severity);
        (sum + f64::from(pattern.confidence) * weight, max + 100.0 * weight)
    });
    if maximum <= 0.0 {
        return 0;
    }
    (weighted / maximum * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn litigation_score(patterns: &[Pattern], flags: &[Flag]) -> u8 {
    litigation_breakdown(patterns, flags).0 as u8
}

fn litigation_breakdown(patterns: &[Pattern], flags: &[Flag]) -> (u32, Vec<String>) {
    let mut score: u32 = patterns
        .iter()
        .map(|pattern| litigation_points(pattern.severity))
        .sum();
    let mut factors = Vec::new();

    if patterns.len() >= 3 {
        score += 15;
        factors.push(format!("{} independent violation patterns", patterns.len()));
    }

    let severe_flags =
        count_severity(flags, Severity::High) + count_severity(flags, Severity::Critical);
    if severe_flags >= 3 {
        score += 10;
        factors.push(format!("{severe_flags} high or critical severity violations"));
    }

    if has_rule(flags, RuleId::StatuteExpired) {
        score += 10;
        factors.push("Collection activity on a time-barred debt".to_string());
    }

    if has_rule(flags, RuleId::ReportingLimitExceeded) {
        score += 10;
        factors.push("Reporting beyond the seven-year limit".to_string());
    }

    (score.min(MAX_LITIGATION_SCORE), factors)
}

fn critical_count(patterns: &[Pattern]) -> usize {
    patterns
        .iter()
        .filter(|pattern| pattern.severity == Severity::Critical)
        .count()
}

fn assessment(patterns: &[Pattern], litigation: u32) -> &'static str {
    let critical = critical_count(patterns);
    if critical >= 2 || litigation >= 80 {
        "Systemic violations: multiple critical patterns point to willful noncompliance and warrant attorney review."
    } else if critical >= 1 || litigation >= 60 {
        "Serious violations: at least one critical pattern supports a formal dispute backed by documentation."
    } else if litigation >= 30 {
        "Moderate violations: the patterns support targeted disputes of the affected fields."
    } else if !patterns.is_empty() {
        "Minor issues: isolated reporting problems that a standard dispute should resolve."
    } else {
        "No violation patterns detected."
    }
}
