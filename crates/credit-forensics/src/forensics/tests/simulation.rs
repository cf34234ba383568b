use super::common::*;

use crate::forensics::fields::FieldSet;
use crate::forensics::flags::{RuleId, Severity};
use crate::forensics::risk;
use crate::forensics::simulation::financing::{self, monthly_payment, rate_quote};
use crate::forensics::simulation::score_impact::{self, estimate_current_score, score_range};
use crate::forensics::simulation::{
    adversarial, CreditFactor, DecisionOutcome, DisputeTactic, LoanProduct, RemovalConfidence,
    ScoreImpactSimulator,
};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 0.01
}

#[test]
fn technical_defects_route_through_every_stage() {
    let flags = vec![
        flag(RuleId::DofdBeforeOpened),
        flag(RuleId::ReportingLimitExceeded),
        flag(RuleId::FutureDate),
    ];
    let profile = risk::score(&flags, &FieldSet::default());
    let result = adversarial::simulate(&flags, &profile);

    let ids: Vec<&str> = result.path.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["automated_verification", "manual_review", "deletion_decision"]
    );
    assert_eq!(result.path[0].outcome, DecisionOutcome::Verify);
    assert_eq!(result.path[1].outcome, DecisionOutcome::HumanReview);
    assert!(close(result.estimated_compliance_cost, 242.5));
    assert!(close(result.settlement_threshold, 5625.0));
    assert_eq!(result.dominant_tactic, DisputeTactic::TechnicalFault);

    let decision = &result.path[2];
    assert_eq!(decision.outcome, DecisionOutcome::Delete);
    assert_eq!(decision.probability, 80);
    assert!(decision.reasoning.contains("$242.50"));
    assert!(decision.counter_tactic.is_none());
}

#[test]
fn non_technical_low_risk_goes_straight_to_decision() {
    let flags = vec![flag(RuleId::PaidWithBalance)];
    let profile = risk::score(&flags, &FieldSet::default());
    let result = adversarial::simulate(&flags, &profile);

    assert_eq!(result.path.len(), 1);
    assert_eq!(result.path[0].id, "deletion_decision");
    assert_eq!(result.path[0].probability, 17);
    assert!(close(result.estimated_compliance_cost, 25.0));
    assert_eq!(result.dominant_tactic, DisputeTactic::LegalRisk);
}

#[test]
fn delete_probability_is_capped() {
    let flags: Vec<_> = [
        RuleId::DofdBeforeOpened,
        RuleId::ExcessiveReportingSpan,
        RuleId::DofdAfterChargeOff,
        RuleId::FutureDate,
        RuleId::ReportingLimitExceeded,
        RuleId::StatusHistoryConflict,
    ]
    .into_iter()
    .map(flag)
    .collect();
    let profile = risk::score(&flags, &FieldSet::default());
    let result = adversarial::simulate(&flags, &profile);

    assert_eq!(result.path.last().map(|node| node.probability), Some(95));
}

#[test]
fn score_impact_for_timeline_and_balance_flags() {
    let flags = vec![flag(RuleId::DofdBeforeOpened), flag(RuleId::BalanceInflation)];
    let fields = FieldSet::default();
    let profile = risk::score(&flags, &fields);
    let result = score_impact::simulate(&flags, &fields, Some(&profile));

    assert_eq!(result.current_score, 600);
    assert_eq!(result.current_range, "Fair");

    let timeline_removal = &result.removals[0];
    assert_eq!(
        (
            timeline_removal.points_low,
            timeline_removal.points_mid,
            timeline_removal.points_high
        ),
        (23, 36, 54)
    );
    assert_eq!(timeline_removal.confidence, RemovalConfidence::High);
    assert_eq!(timeline_removal.time_to_reflect, "30-45 days");

    let balance_removal = &result.removals[1];
    assert_eq!(
        (
            balance_removal.points_low,
            balance_removal.points_mid,
            balance_removal.points_high
        ),
        (10, 16, 24)
    );

    assert_eq!(result.projected.optimistic, 662);
    assert_eq!(result.projected.realistic, 642);
    assert_eq!(result.projected.conservative, 626);
}

#[test]
fn category_impacts_follow_flag_categories() {
    let flags = vec![flag(RuleId::DofdBeforeOpened), flag(RuleId::BalanceInflation)];
    let profile = risk::score(&flags, &FieldSet::default());
    let result = ScoreImpactSimulator::new().simulate(&flags, &FieldSet::default(), Some(&profile));

    let impact = |factor: CreditFactor| {
        result
            .category_impacts
            .iter()
            .find(|impact| impact.factor == factor)
            .map(|impact| (impact.affected_items, impact.projected_improvement))
    };
    assert_eq!(result.category_impacts.len(), 5);
    assert_eq!(impact(CreditFactor::LengthOfHistory), Some((1, 36)));
    assert_eq!(impact(CreditFactor::AmountsOwed), Some((1, 16)));
    assert_eq!(impact(CreditFactor::PaymentHistory), Some((0, 0)));
    let weights: u32 = result
        .category_impacts
        .iter()
        .map(|impact| u32::from(impact.weight_percent))
        .sum();
    assert_eq!(weights, 100);
}

#[test]
fn recovery_timeline_is_monotone_with_milestones() {
    let flags = vec![flag(RuleId::DofdBeforeOpened), flag(RuleId::BalanceInflation)];
    let profile = risk::score(&flags, &FieldSet::default());
    let result = score_impact::simulate(&flags, &FieldSet::default(), Some(&profile));

    assert_eq!(result.timeline.len(), 13);
    assert_eq!(result.timeline[0].score, 600);
    assert_eq!(result.timeline[12].score, 642);
    assert_eq!(result.timeline[0].milestone.as_deref(), Some("Disputes filed"));
    assert!(result.timeline[4].milestone.is_none());
    assert!(result
        .timeline
        .windows(2)
        .all(|pair| pair[0].score <= pair[1].score));
}

#[test]
fn current_score_estimate_uses_risk_band_and_penalties() {
    assert_eq!(estimate_current_score(&[], None), 650);

    let low = risk::score(&[], &FieldSet::default());
    assert_eq!(estimate_current_score(&[], Some(&low)), 680);

    let flags = vec![flag_with_severity(RuleId::PaidWithBalance, Severity::Critical)];
    assert_eq!(estimate_current_score(&flags, None), 635);

    let many = severity_flags(40, 0, 0);
    let profile = risk::score(&many, &FieldSet::default());
    assert_eq!(estimate_current_score(&many, Some(&profile)), 300);
}

#[test]
fn score_ranges_use_fico_bands() {
    assert_eq!(score_range(300), "Poor");
    assert_eq!(score_range(579), "Poor");
    assert_eq!(score_range(580), "Fair");
    assert_eq!(score_range(670), "Good");
    assert_eq!(score_range(740), "Very Good");
    assert_eq!(score_range(800), "Exceptional");
}

#[test]
fn no_flags_projects_no_change() {
    let result = score_impact::simulate(&[], &FieldSet::default(), None);
    assert_eq!(result.current_score, 650);
    assert_eq!(result.projected.realistic, 650);
    assert!(result.removals.is_empty());
    assert!(result
        .financial_benefits
        .iter()
        .all(|benefit| benefit.monthly_savings == 0.0));
}

#[test]
fn rate_bands_pick_highest_qualifying_tier() {
    assert_eq!(rate_quote(800).min_score, 760);
    assert_eq!(rate_quote(760).min_score, 760);
    assert_eq!(rate_quote(759).min_score, 700);
    assert_eq!(rate_quote(600).min_score, 300);
    assert_eq!(rate_quote(250).min_score, 300);
}

#[test]
fn mortgage_payment_is_amortized() {
    assert!(close(monthly_payment(LoanProduct::Mortgage, 6.5), 1896.20));
    assert!(close(monthly_payment(LoanProduct::CreditCard, 18.0), 150.0));
    assert!(close(monthly_payment(LoanProduct::AutoLoan, 0.0), 35_000.0 / 60.0));
}

#[test]
fn financial_benefits_compare_rate_bands() {
    let benefits = financing::financial_benefits(600, 642);
    assert_eq!(benefits.len(), 3);

    let card = benefits
        .iter()
        .find(|benefit| benefit.product == LoanProduct::CreditCard)
        .expect("card benefit");
    assert!(close(card.current_monthly, 249.17));
    assert!(close(card.projected_monthly, 225.0));
    assert!(close(card.monthly_savings, 24.17));
    assert!(close(card.annual_savings, 290.04));
    assert!(close(card.lifetime_savings, 1450.2));

    let mortgage = &benefits[0];
    assert_eq!(mortgage.product, LoanProduct::Mortgage);
    assert!(mortgage.projected_rate < mortgage.current_rate);
    assert!(mortgage.monthly_savings > 0.0);
}
