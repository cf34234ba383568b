use super::common::*;

use crate::forensics::fields::FieldSet;
use crate::forensics::flags::{RuleId, Severity};
use crate::forensics::risk::{self, DisputeStrength, RiskLevel, RiskScorer, MAX_RISK_SCORE};

#[test]
fn three_high_and_one_medium_flag_score_ninety() {
    let profile = risk::score(&severity_flags(3, 1, 0), &FieldSet::default());

    assert_eq!(profile.overall_score, 90);
    assert_eq!(profile.risk_level, RiskLevel::Critical);
    assert_eq!(profile.dispute_strength, DisputeStrength::Definitive);
    assert!(profile.litigation_potential);
}

#[test]
fn no_flags_is_low_and_weak() {
    let profile = RiskScorer::new().score(&[], &FieldSet::default());

    assert_eq!(profile.overall_score, 0);
    assert_eq!(profile.risk_level, RiskLevel::Low);
    assert_eq!(profile.dispute_strength, DisputeStrength::Weak);
    assert!(!profile.litigation_potential);
    assert!(profile.detected_patterns.is_empty());
    assert!(profile.key_violations.is_empty());
    assert!(profile.recommended_approach.starts_with("Keep monitoring"));
}

#[test]
fn score_bands_follow_thresholds() {
    let cases = [
        (severity_flags(0, 1, 2), 25, RiskLevel::Medium, DisputeStrength::Moderate),
        (severity_flags(0, 0, 4), 20, RiskLevel::Low, DisputeStrength::Weak),
        (severity_flags(2, 0, 0), 50, RiskLevel::High, DisputeStrength::Strong),
        (severity_flags(3, 0, 0), 75, RiskLevel::Critical, DisputeStrength::Definitive),
    ];
    for (flags, score, level, strength) in cases {
        let profile = risk::score(&flags, &FieldSet::default());
        assert_eq!(u32::from(profile.overall_score), score);
        assert_eq!(profile.risk_level, level);
        assert_eq!(profile.dispute_strength, strength);
    }
}

#[test]
fn score_is_capped_and_monotone_in_flag_counts() {
    let fields = FieldSet::default();
    for high in 0..6 {
        for medium in 0..6 {
            for low in 0..6 {
                let base = risk::score(&severity_flags(high, medium, low), &fields).score();
                assert!(base <= MAX_RISK_SCORE);
                for (dh, dm, dl) in [(1, 0, 0), (0, 1, 0), (0, 0, 1)] {
                    let more = risk::score(
                        &severity_flags(high + dh, medium + dm, low + dl),
                        &fields,
                    )
                    .score();
                    assert!(more >= base, "{high}/{medium}/{low} -> {more} < {base}");
                }
            }
        }
    }
}

#[test]
fn critical_flags_outweigh_high_flags() {
    let critical = vec![flag_with_severity(RuleId::PaidWithBalance, Severity::Critical)];
    let high = vec![flag_with_severity(RuleId::PaidWithBalance, Severity::High)];
    let fields = FieldSet::default();

    assert_eq!(risk::score(&critical, &fields).overall_score, 35);
    assert!(risk::score(&critical, &fields).score() > risk::score(&high, &fields).score());
}

#[test]
fn two_timeline_rules_form_re_aging_pattern() {
    let fields = fields(&[("dofd", "2020-01-01")]);
    let flags = vec![flag(RuleId::DofdBeforeOpened), flag(RuleId::FutureDate)];
    let profile = risk::score(&flags, &fields);

    assert_eq!(profile.detected_patterns.len(), 1);
    let pattern = &profile.detected_patterns[0];
    assert_eq!(pattern.name, "Debt Re-Aging");
    assert_eq!(pattern.confidence, 90);
    assert_eq!(
        pattern.matched_rules,
        vec![RuleId::DofdBeforeOpened, RuleId::FutureDate]
    );
    assert!(pattern.description.contains("2020-01-01"));
    assert!(profile.litigation_potential);
}

#[test]
fn re_aging_confidence_caps_at_ninety_five() {
    let flags: Vec<_> = [
        RuleId::DofdBeforeOpened,
        RuleId::ExcessiveReportingSpan,
        RuleId::DofdAfterChargeOff,
        RuleId::FutureDate,
    ]
    .into_iter()
    .map(flag)
    .collect();
    let profile = risk::score(&flags, &FieldSet::default());
    assert_eq!(profile.detected_patterns[0].confidence, 95);
}

#[test]
fn repeated_timeline_rule_counts_once() {
    let flags = vec![flag(RuleId::FutureDate), flag(RuleId::FutureDate)];
    let profile = risk::score(&flags, &FieldSet::default());

    assert!(profile.detected_patterns.is_empty());
    assert_eq!(profile.overall_score, 50);
    assert!(profile.litigation_potential);
}

#[test]
fn key_violations_list_most_severe_first_without_duplicates() {
    let flags = vec![
        flag(RuleId::BalanceInflation),
        flag(RuleId::PaidWithBalance),
        flag(RuleId::BalanceInflation),
    ];
    let profile = risk::score(&flags, &FieldSet::default());

    assert_eq!(profile.key_violations.len(), 2);
    assert_eq!(profile.key_violations[0], flag(RuleId::PaidWithBalance).rule_name);
}
