//! End-to-end behavior of the single-account pipeline through the public analyzer.

use chrono::NaiveDate;
use credit_forensics::config::AnalysisConfig;
use credit_forensics::forensics::{
    AnalysisOptions, CountdownKind, DebtInstrument, DisputeStrength, DisputeTactic, FieldSet,
    ForensicAnalyzer, PatternKind, RiskLevel, RuleId, Urgency,
};
use serde_json::json;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn today() -> NaiveDate {
    date(2024, 6, 15)
}

fn tradeline(value: serde_json::Value) -> FieldSet {
    serde_json::from_value(value).expect("tradeline deserializes")
}

fn zombie_collection() -> FieldSet {
    tradeline(json!({
        "creditorName": "First National Bank",
        "furnisherName": "Midland Credit Management",
        "accountType": "Collection",
        "accountStatus": "Collection account",
        "currentBalance": 2400,
        "originalAmount": "$1,200.00",
        "dateOpened": "2009-03-01",
        "dofd": "2012-01-01",
        "lastPaymentDate": "2011-06-01",
        "dateLastReported": "2024-05-01",
        "stateCode": "TX"
    }))
}

#[test]
fn zombie_collection_produces_a_litigation_grade_report() {
    let report = ForensicAnalyzer::default().analyze(
        &zombie_collection(),
        &AnalysisOptions::default(),
        today(),
    );

    let rules: Vec<RuleId> = report.flags.iter().map(|flag| flag.rule_id).collect();
    assert_eq!(
        rules,
        vec![
            RuleId::ReportingLimitExceeded,
            RuleId::BalanceInflation,
            RuleId::InterestCapExceeded,
            RuleId::StatuteExpired,
        ]
    );

    assert_eq!(report.risk.overall_score, 80);
    assert_eq!(report.risk.risk_level, RiskLevel::Critical);
    assert_eq!(report.risk.dispute_strength, DisputeStrength::Definitive);
    assert!(report.risk.litigation_potential);

    assert_eq!(report.patterns.patterns[0].kind, PatternKind::ZombieDebt);
    assert_eq!(report.patterns.litigation_score, 95);

    assert!(report
        .deadlines
        .countdowns
        .iter()
        .all(|countdown| countdown.urgency == Urgency::Expired));

    assert_eq!(report.adversarial.path.len(), 3);
    assert_eq!(report.adversarial.dominant_tactic, DisputeTactic::LegalRisk);
    assert!((report.adversarial.estimated_compliance_cost - 217.5).abs() < 0.01);

    assert_eq!(report.score_impact.current_score, 480);
    assert_eq!(report.score_impact.current_range, "Poor");
    assert!(report.score_impact.projected.realistic > 480);

    let texas = report.jurisdiction.expect("jurisdiction attached");
    assert_eq!(texas.state_code, "TX");
}

#[test]
fn clean_account_has_nothing_to_dispute() {
    let fields = tradeline(json!({
        "creditorName": "Acme Bank",
        "accountType": "Credit Card",
        "accountStatus": "Pays as agreed",
        "currentBalance": "350",
        "originalAmount": "2000",
        "dateOpened": "2019-04-01",
        "paymentHistory": "OK OK OK OK OK OK"
    }));
    let report = ForensicAnalyzer::default().analyze(&fields, &AnalysisOptions::default(), today());

    assert!(report.flags.is_empty());
    assert_eq!(report.risk.overall_score, 0);
    assert_eq!(report.risk.risk_level, RiskLevel::Low);
    assert!(report.patterns.patterns.is_empty());
    assert_eq!(report.patterns.assessment, "No violation patterns detected.");
    assert!(report.deadlines.countdowns.is_empty());
    assert_eq!(report.adversarial.path.len(), 1);
    assert!(report.jurisdiction.is_none());
    assert_eq!(report.score_impact.current_score, 680);
}

#[test]
fn dispute_date_adds_a_response_countdown() {
    let options = AnalysisOptions {
        dispute_filed: Some(date(2024, 5, 20)),
        ..AnalysisOptions::default()
    };
    let report = ForensicAnalyzer::default().analyze(&zombie_collection(), &options, today());

    let response = report
        .deadlines
        .countdowns
        .iter()
        .find(|countdown| countdown.kind == CountdownKind::ResponseDeadline)
        .expect("response countdown");
    assert_eq!(response.target_date, date(2024, 6, 19));
    assert_eq!(response.urgency, Urgency::Critical);
    assert!(report.deadlines.next_action.contains("4 days until response_deadline"));
}

#[test]
fn configured_instrument_drives_limitations_unless_overridden() {
    let fields = tradeline(json!({
        "creditorName": "Acme Bank",
        "lastPaymentDate": "2021-01-01",
        "stateCode": "CA"
    }));
    let analyzer = ForensicAnalyzer::new(AnalysisConfig {
        default_instrument: DebtInstrument::OralContract,
        ..AnalysisConfig::default()
    });

    let oral = analyzer.analyze(&fields, &AnalysisOptions::default(), today());
    assert_eq!(oral.deadlines.countdowns[0].target_date, date(2023, 1, 1));
    assert!(oral.deadlines.countdowns[0].expired);

    let written = analyzer.analyze(
        &fields,
        &AnalysisOptions {
            instrument: Some(DebtInstrument::WrittenContract),
            ..AnalysisOptions::default()
        },
        today(),
    );
    assert_eq!(written.deadlines.countdowns[0].target_date, date(2025, 1, 1));
}

#[test]
fn report_serializes_with_camel_case_sections() {
    let report = ForensicAnalyzer::default().analyze(
        &zombie_collection(),
        &AnalysisOptions::default(),
        today(),
    );
    let json = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(json["evaluatedOn"], "2024-06-15");
    assert_eq!(json["fields"]["currentBalance"], "2400");
    assert_eq!(json["flags"][0]["ruleId"], "K7");
    assert_eq!(json["risk"]["riskLevel"], "critical");
    assert_eq!(json["patterns"]["patterns"][0]["kind"], "ZOMBIE_DEBT");
    assert!(json["scoreImpact"]["timeline"].is_array());
    assert_eq!(json["jurisdiction"]["stateCode"], "TX");
    assert!(report.summary().contains("risk 80 (critical)"));
}
