use std::collections::BTreeSet;

use super::common::*;

use crate::forensics::fields::FieldSet;
use crate::forensics::flags::RuleId;
use crate::forensics::reconcile::{
    self, creditor_key, Bureau, BureauComparison, BureauReconciler, ComparisonField,
    ComparisonRisk,
    DiscrepancySeverity, UNKNOWN_CREDITOR_KEY,
};

fn clean_account(creditor: &str) -> FieldSet {
    fields(&[
        ("creditorName", creditor),
        ("accountStatus", "Current"),
        ("currentBalance", "500"),
        ("originalAmount", "1000"),
        ("dateOpened", "2020-01-01"),
    ])
}

fn with(base: &FieldSet, key: &str, value: &str) -> FieldSet {
    let mut json = serde_json::to_value(base).expect("serialize fields");
    json[key] = serde_json::Value::String(value.to_string());
    serde_json::from_value(json).expect("deserialize fields")
}

#[test]
fn creditor_keys_drop_punctuation_and_entity_suffixes() {
    assert_eq!(
        creditor_key("Midland Credit Management, Inc."),
        "midlandcreditmanagement"
    );
    assert_eq!(creditor_key("PORTFOLIO RECOVERY ASSOCIATES LLC"), "portfolio");
    assert_eq!(creditor_key("Capital One, N.A."), "capitalone");
    assert_eq!(creditor_key("LLC"), "llc");
    assert_eq!(creditor_key(""), UNKNOWN_CREDITOR_KEY);
    assert_eq!(creditor_key(" --- "), UNKNOWN_CREDITOR_KEY);
}

#[test]
fn consistent_reporting_is_low_risk() {
    let experian = vec![clean_account("Acme Bank")];
    let equifax = vec![clean_account("ACME BANK, INC.")];
    let comparisons = reconcile::compare(&experian, &equifax, &[], today());

    assert_eq!(comparisons.len(), 1);
    let comparison = &comparisons[0];
    assert_eq!(comparison.creditor_key, "acmebank");
    assert_eq!(
        comparison.bureaus().collect::<Vec<_>>(),
        vec![Bureau::Experian, Bureau::Equifax]
    );
    assert!(comparison.discrepancies.is_empty());
    assert_eq!(comparison.flag_count(), 0);
    assert_eq!(comparison.risk, ComparisonRisk::Low);
    assert!(comparison.recommendation.contains("consistently"));
}

#[test]
fn formatting_differences_are_not_discrepancies() {
    let base = clean_account("Acme Bank");
    let experian = vec![with(&base, "dofd", "2021-03-15")];
    let equifax = vec![with(
        &with(&base, "dofd", "03/15/2021"),
        "currentBalance",
        "$500.00",
    )];
    let transunion = vec![with(&base, "accountStatus", "  CURRENT ")];

    let comparisons = reconcile::compare(&experian, &equifax, &transunion, today());
    assert!(comparisons[0].discrepancies.is_empty());
}

#[test]
fn dofd_mismatch_is_critical() {
    let base = clean_account("Acme Bank");
    let experian = vec![with(&base, "dofd", "2021-03-15")];
    let transunion = vec![with(&base, "dofd", "2022-09-01")];

    let comparisons = reconcile::compare(&experian, &[], &transunion, today());
    let comparison = &comparisons[0];

    assert_eq!(comparison.discrepancies.len(), 1);
    let discrepancy = &comparison.discrepancies[0];
    assert_eq!(discrepancy.field, ComparisonField::Dofd);
    assert_eq!(discrepancy.severity, DiscrepancySeverity::Critical);
    assert_eq!(discrepancy.values[&Bureau::Experian], "2021-03-15");
    assert_eq!(discrepancy.values[&Bureau::TransUnion], "2022-09-01");
    assert!(discrepancy.explanation.contains("re-aging"));
    assert_eq!(comparison.risk, ComparisonRisk::High);
}

#[test]
fn balance_spread_decides_balance_severity() {
    let base = clean_account("Acme Bank");

    let small = reconcile::compare(
        &[base.clone()],
        &[with(&base, "currentBalance", "800")],
        &[],
        today(),
    );
    assert_eq!(small[0].discrepancies[0].field, ComparisonField::CurrentBalance);
    assert_eq!(small[0].discrepancies[0].severity, DiscrepancySeverity::Minor);
    assert_eq!(small[0].risk, ComparisonRisk::Low);

    let large = reconcile::compare(
        &[base.clone()],
        &[with(&base, "currentBalance", "1100")],
        &[],
        today(),
    );
    assert_eq!(
        large[0].discrepancies[0].severity,
        DiscrepancySeverity::Significant
    );
    assert!(large[0].discrepancies[0].explanation.contains("$600.00"));
    assert_eq!(large[0].risk, ComparisonRisk::Medium);
}

#[test]
fn original_amount_mismatch_is_minor() {
    let base = clean_account("Acme Bank");
    let comparisons = reconcile::compare(
        &[base.clone()],
        &[],
        &[with(&base, "originalAmount", "1200")],
        today(),
    );
    let discrepancy = &comparisons[0].discrepancies[0];
    assert_eq!(discrepancy.field, ComparisonField::OriginalAmount);
    assert_eq!(discrepancy.severity, DiscrepancySeverity::Minor);
}

#[test]
fn two_significant_discrepancies_raise_risk_to_high() {
    let base = clean_account("Acme Bank");
    let other = with(
        &with(&base, "dateOpened", "2019-05-01"),
        "accountStatus",
        "Closed",
    );
    let comparisons = reconcile::compare(&[base], &[other], &[], today());

    let fields: Vec<ComparisonField> = comparisons[0]
        .discrepancies
        .iter()
        .map(|item| item.field)
        .collect();
    assert_eq!(
        fields,
        vec![ComparisonField::DateOpened, ComparisonField::AccountStatus]
    );
    assert_eq!(comparisons[0].risk, ComparisonRisk::High);
}

#[test]
fn severe_flag_on_one_bureau_raises_risk() {
    let base = clean_account("Acme Bank");
    let paid = with(&base, "accountStatus", "Paid in full");
    let comparisons = reconcile::compare(&[base], &[paid], &[], today());

    let comparison = &comparisons[0];
    assert_eq!(comparison.flags[&Bureau::Experian].len(), 0);
    assert_eq!(
        comparison.flags[&Bureau::Equifax][0].rule_id,
        RuleId::PaidWithBalance
    );
    assert_eq!(comparison.risk, ComparisonRisk::High);
}

#[test]
fn repeated_creditors_pair_by_occurrence() {
    let first = clean_account("Acme Bank");
    let second = with(&first, "dateOpened", "2022-02-01");
    let comparisons = BureauReconciler::new().compare(
        &[first.clone(), second],
        &[first],
        &[],
        today(),
    );

    assert_eq!(comparisons.len(), 2);
    let mut coverage: Vec<usize> = comparisons
        .iter()
        .map(|comparison| comparison.accounts.len())
        .collect();
    coverage.sort();
    assert_eq!(coverage, vec![1, 2]);
    assert!(comparisons
        .iter()
        .all(|comparison| comparison.discrepancies.is_empty()));
}

#[test]
fn comparisons_sort_by_risk_then_creditor() {
    let zeta = clean_account("Zeta Finance");
    let alpha = clean_account("Alpha Credit");
    let risky = clean_account("Midway Bank");
    let risky_other = with(&risky, "dofd", "2020-01-01");
    let risky_base = with(&risky, "dofd", "2021-01-01");

    let comparisons = reconcile::compare(
        &[zeta, alpha, risky_base],
        &[risky_other],
        &[],
        today(),
    );
    let keys: Vec<&str> = comparisons
        .iter()
        .map(|comparison| comparison.creditor_key.as_str())
        .collect();
    assert_eq!(keys, vec!["midwaybank", "alphacredit", "zetafinance"]);
}

#[test]
fn bureau_names_parse_loosely() {
    assert_eq!(Bureau::parse("Experian"), Some(Bureau::Experian));
    assert_eq!(Bureau::parse("EQ"), Some(Bureau::Equifax));
    assert_eq!(Bureau::parse("Trans Union"), Some(Bureau::TransUnion));
    assert_eq!(Bureau::parse("innovis"), None);
    assert_eq!(Bureau::TransUnion.to_string(), "TransUnion");
}

#[test]
fn empty_input_has_no_comparisons() {
    assert!(reconcile::compare(&[], &[], &[], today()).is_empty());
}

type ComparisonShape = (String, ComparisonRisk, BTreeSet<(ComparisonField, DiscrepancySeverity)>);

/// Bureau-independent view of a reconciliation result.
fn shape(comparisons: &[BureauComparison]) -> Vec<ComparisonShape> {
    let mut shapes: Vec<ComparisonShape> = comparisons
        .iter()
        .map(|comparison| {
            let discrepancies = comparison
                .discrepancies
                .iter()
                .map(|item| (item.field, item.severity))
                .collect();
            (comparison.creditor_key.clone(), comparison.risk, discrepancies)
        })
        .collect();
    shapes.sort();
    shapes
}

#[test]
fn reconciliation_is_symmetric_in_bureau_identity() {
    let acme = clean_account("Acme Bank");
    let harbor = clean_account("Harbor Lending");
    let scenarios: Vec<[Vec<FieldSet>; 3]> = vec![
        [
            vec![with(&acme, "dofd", "2020-01-01")],
            vec![with(&acme, "dofd", "2021-01-01")],
            vec![],
        ],
        [
            vec![acme.clone()],
            vec![with(&acme, "currentBalance", "1200")],
            vec![with(&acme, "currentBalance", "$500.00")],
        ],
        [
            vec![acme.clone()],
            vec![with(&acme, "accountStatus", "Collection")],
            vec![acme.clone()],
        ],
        [
            vec![acme.clone(), with(&acme, "dateOpened", "2018-05-01")],
            vec![
                with(&acme, "currentBalance", "800"),
                with(&acme, "dateOpened", "2018-06-01"),
            ],
            vec![harbor.clone(), acme.clone()],
        ],
        [
            vec![
                with(&with(&acme, "dofd", "2019-01-01"), "accountStatus", "Paid"),
                harbor.clone(),
            ],
            vec![with(&acme, "dofd", "2019-03-01")],
            vec![with(&harbor, "currentBalance", "2000"), acme.clone()],
        ],
    ];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    let baseline = shape(&reconcile::compare(
        &scenarios[0][0],
        &scenarios[0][1],
        &scenarios[0][2],
        today(),
    ));
    assert_eq!(baseline.len(), 1);
    assert!(baseline[0]
        .2
        .contains(&(ComparisonField::Dofd, DiscrepancySeverity::Critical)));

    for (index, lists) in scenarios.iter().enumerate() {
        let expected = shape(&reconcile::compare(&lists[0], &lists[1], &lists[2], today()));
        assert!(!expected.is_empty(), "scenario {index} compared nothing");
        for [a, b, c] in orders {
            let permuted = shape(&reconcile::compare(&lists[a], &lists[b], &lists[c], today()));
            assert_eq!(permuted, expected, "scenario {index}, order {a}{b}{c}");
        }
    }
}
