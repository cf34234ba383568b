use crate::infra::{analysis_service, load_fields, parse_instrument};
use chrono::{Local, NaiveDate};
use clap::Args;
use credit_forensics::config::{AnalysisConfig, AppConfig};
use credit_forensics::error::AppError;
use credit_forensics::forensics::dates::add_days;
use credit_forensics::forensics::fields::format_amount;
use credit_forensics::forensics::{
    AnalysisOptions, AnalysisRequest, BureauAccounts, BureauComparison, BureauReconciler,
    DebtInstrument, FieldSet, ForensicReport, JurisdictionProfile, TradelineImporter,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Tradeline fields as inline JSON or a path to a JSON file (camelCase keys)
    #[arg(long)]
    pub(crate) fields: String,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Date a bureau dispute was filed, enabling the response countdown
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) dispute_filed: Option<NaiveDate>,
    /// Date a collection notice was received, enabling the validation window countdown
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) validation_notice: Option<NaiveDate>,
    /// Two-letter state code overriding the tradeline's own
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Debt instrument for the statute-of-limitations clock (written, oral, promissory, open)
    #[arg(long, value_parser = parse_instrument)]
    pub(crate) instrument: Option<DebtInstrument>,
    /// Print the stored record as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReconcileArgs {
    /// Tradeline CSV export with a Bureau column
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print comparisons as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct JurisdictionArgs {
    /// Two-letter state code, e.g. TX
    pub(crate) state: String,
    /// Print the profile as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the evaluation date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        fields,
        today,
        dispute_filed,
        validation_notice,
        state,
        instrument,
        json,
    } = args;

    let config = AppConfig::load()?;
    let fields = load_fields(&fields)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let request = AnalysisRequest {
        fields,
        options: AnalysisOptions {
            dispute_filed,
            validation_notice_received: validation_notice,
            instrument,
            state_code: state,
        },
        as_of: Some(today),
    };
    let record = analysis_service(config.analysis).analyze(request, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Analysis {} (created {})", record.id, record.created_on);
        println!("{}", render_report(&record.report));
    }
    Ok(())
}

pub(crate) fn run_reconcile(args: ReconcileArgs) -> Result<(), AppError> {
    let ReconcileArgs { csv, today, json } = args;

    let accounts = BureauAccounts::partition(TradelineImporter::from_path(&csv)?);
    if accounts.assigned_len() == 0 {
        return Err(AppError::Input(format!(
            "{} has no rows naming Experian, Equifax or TransUnion",
            csv.display()
        )));
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let comparisons = accounts.reconcile(today);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparisons)?);
    } else {
        println!(
            "Reconciled {} tradeline(s) from {} on {today}",
            accounts.assigned_len(),
            csv.display()
        );
        if !accounts.unassigned.is_empty() {
            println!(
                "Skipped {} row(s) without a recognised bureau",
                accounts.unassigned.len()
            );
        }
        println!("{}", render_comparisons(&comparisons));
    }
    Ok(())
}

pub(crate) fn run_jurisdiction(args: JurisdictionArgs) -> Result<(), AppError> {
    let profile = analysis_service(AnalysisConfig::default()).jurisdiction(&args.state)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(profile)?);
    } else {
        println!("{}", render_profile(profile));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let config = AppConfig::load()?;

    println!("Credit Report Forensics Demo");
    println!("============================");
    println!("Sample: a charged-off card resold to a collector and still reported in 2024.");
    println!();

    let report = demo_report(config.analysis, today)?;
    println!("{}", render_report(&report));
    println!();

    println!("Cross-bureau view");
    println!("-----------------");
    println!("{}", render_comparisons(&demo_comparisons(today)));
    Ok(())
}

fn sample_account() -> FieldSet {
    FieldSet {
        creditor_name: Some("First National Bank".to_string()),
        furnisher_name: Some("Midland Credit Management".to_string()),
        account_type: Some("Collection".to_string()),
        account_status: Some("Collection account".to_string()),
        current_balance: Some("2400".to_string()),
        original_amount: Some("1200".to_string()),
        date_opened: Some("2009-03-01".to_string()),
        dofd: Some("2012-01-01".to_string()),
        last_payment_date: Some("2011-06-01".to_string()),
        date_last_reported: Some("2024-05-01".to_string()),
        state_code: Some("TX".to_string()),
        ..FieldSet::default()
    }
}

fn demo_report(config: AnalysisConfig, today: NaiveDate) -> Result<ForensicReport, AppError> {
    let request = AnalysisRequest {
        fields: sample_account(),
        options: AnalysisOptions {
            dispute_filed: add_days(today, -26),
            ..AnalysisOptions::default()
        },
        as_of: Some(today),
    };
    let record = analysis_service(config).analyze(request, today)?;
    Ok(record.report)
}

/// The same debt as Experian reports it and as a re-aged Equifax copy.
fn demo_comparisons(today: NaiveDate) -> Vec<BureauComparison> {
    let experian = sample_account();
    let equifax = FieldSet {
        dofd: Some("2013-01-01".to_string()),
        current_balance: Some("2600".to_string()),
        ..sample_account()
    };
    BureauReconciler::new().compare(&[experian], &[equifax], &[], today)
}

pub(crate) fn render_report(report: &ForensicReport) -> String {
    let mut lines = vec![
        format!("Forensic analysis: {}", report.summary()),
        format!("Evaluated on {}", report.evaluated_on),
    ];

    if report.flags.is_empty() {
        lines.push("No rule violations detected.".to_string());
    } else {
        lines.push("Flags:".to_string());
        for flag in &report.flags {
            lines.push(format!(
                "  [{}] {} ({} severity, {}% confidence)",
                flag.rule_id,
                flag.rule_name,
                flag.severity.label(),
                flag.confidence
            ));
            lines.push(format!("      {}", flag.explanation));
        }
    }

    let risk = &report.risk;
    let litigation = if risk.litigation_potential {
        ", litigation candidate"
    } else {
        ""
    };
    lines.push(format!(
        "Risk: {}/100 {} with {} dispute strength{litigation}",
        risk.overall_score,
        risk.risk_level.label(),
        risk.dispute_strength.label()
    ));
    lines.push(format!("  Approach: {}", risk.recommended_approach));

    let patterns = &report.patterns;
    if !patterns.patterns.is_empty() {
        lines.push(format!(
            "Patterns ({}% overall confidence, litigation score {}):",
            patterns.overall_confidence, patterns.litigation_score
        ));
        for pattern in &patterns.patterns {
            lines.push(format!(
                "  {} [{}%, {}]",
                pattern.name,
                pattern.confidence,
                pattern.severity.label()
            ));
        }
    }
    lines.push(format!("  Assessment: {}", patterns.assessment));

    if !report.deadlines.countdowns.is_empty() {
        lines.push("Deadlines:".to_string());
        for countdown in &report.deadlines.countdowns {
            lines.push(format!(
                "  {}: {} ({} days, {})",
                countdown.kind.label(),
                countdown.target_date,
                countdown.days_remaining,
                countdown.urgency.label()
            ));
        }
    }
    lines.push(format!("  Next action: {}", report.deadlines.next_action));

    let adversarial = &report.adversarial;
    lines.push(format!(
        "Furnisher simulation: {} leads, compliance cost {}, settlement threshold {}",
        adversarial.dominant_tactic.label(),
        format_amount(adversarial.estimated_compliance_cost),
        format_amount(adversarial.settlement_threshold)
    ));
    for node in &adversarial.path {
        lines.push(format!("  {} ({}% to delete)", node.label, node.probability));
    }

    let impact = &report.score_impact;
    lines.push(format!(
        "Score impact: {} ({}) to {} realistic, {} optimistic",
        impact.current_score,
        impact.current_range,
        impact.projected.realistic,
        impact.projected.optimistic
    ));

    if let Some(profile) = &report.jurisdiction {
        lines.push(format!(
            "Jurisdiction: {} ({}), {}-year written contract limit",
            profile.state_name,
            profile.state_code,
            profile.statute_of_limitations.written_contract
        ));
    }

    lines.join("\n")
}

pub(crate) fn render_comparisons(comparisons: &[BureauComparison]) -> String {
    if comparisons.is_empty() {
        return "No tradelines to compare.".to_string();
    }

    let mut lines = Vec::new();
    for comparison in comparisons {
        let bureaus: Vec<&str> = comparison.bureaus().map(|bureau| bureau.label()).collect();
        lines.push(format!(
            "{}: {} risk across {} ({} flag(s))",
            comparison.creditor_name,
            comparison.risk.label(),
            bureaus.join(", "),
            comparison.flag_count()
        ));
        for discrepancy in &comparison.discrepancies {
            let values: Vec<String> = discrepancy
                .values
                .iter()
                .map(|(bureau, value)| format!("{bureau}={value}"))
                .collect();
            lines.push(format!(
                "  {} differs: {}",
                discrepancy.field.label(),
                values.join(", ")
            ));
        }
        lines.push(format!("  {}", comparison.recommendation));
    }
    lines.join("\n")
}

pub(crate) fn render_profile(profile: &JurisdictionProfile) -> String {
    let mut lines = Vec::new();
    if profile.is_default() {
        lines.push("No state-specific profile; showing national defaults.".to_string());
    } else {
        lines.push(format!("{} ({})", profile.state_name, profile.state_code));
    }

    lines.push("Statute of limitations:".to_string());
    for instrument in [
        DebtInstrument::WrittenContract,
        DebtInstrument::OralContract,
        DebtInstrument::PromissoryNote,
        DebtInstrument::OpenAccount,
    ] {
        lines.push(format!(
            "  {}: {} years",
            instrument.label(),
            profile.sol_years(instrument)
        ));
    }

    let caps = &profile.interest_caps;
    lines.push(format!(
        "Interest caps: judgment {:.1}%, medical {:.1}%, consumer {:.1}%",
        caps.judgment, caps.medical, caps.consumer
    ));
    lines.push(format!(
        "Enhanced protections: {}",
        profile.protections.enhanced_count()
    ));
    for statute in profile.key_statutes {
        lines.push(format!("  Statute: {statute}"));
    }
    for note in profile.special_notes {
        lines.push(format!("  Note: {note}"));
    }
    if !profile.regulator.name.is_empty() {
        lines.push(format!(
            "Regulator: {} {}",
            profile.regulator.name, profile.regulator.url
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_forensics::forensics::jurisdiction;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    #[test]
    fn demo_report_walks_the_zombie_account() {
        let report = demo_report(AnalysisConfig::default(), today()).expect("demo analyses");
        let text = render_report(&report);

        assert!(text.starts_with(
            "Forensic analysis: First National Bank: 4 flag(s), risk 80 (critical), 3 pattern(s)"
        ));
        assert!(text.contains("[K7]"));
        assert!(text.contains("Risk: 80/100 critical with definitive dispute strength"));
        assert!(text.contains("response_deadline: 2024-06-19 (4 days, critical)"));
        assert!(text.contains("Jurisdiction: Texas (TX)"));
    }

    #[test]
    fn demo_comparison_flags_the_reaged_copy() {
        let text = render_comparisons(&demo_comparisons(today()));
        assert!(text.starts_with("First National Bank: high risk"));
        assert!(text.contains("date of first delinquency differs"));
    }

    #[test]
    fn empty_comparisons_render_a_placeholder() {
        assert_eq!(render_comparisons(&[]), "No tradelines to compare.");
    }

    #[test]
    fn profiles_render_statutes_and_defaults() {
        let kentucky = render_profile(jurisdiction::lookup("KY"));
        assert!(kentucky.starts_with("Kentucky (KY)"));
        assert!(kentucky.contains("promissory note: 15 years"));

        let fallback = render_profile(jurisdiction::lookup("ZZ"));
        assert!(fallback.starts_with("No state-specific profile"));
        assert!(fallback.contains("written contract: 5 years"));
    }

    #[test]
    fn malformed_state_codes_are_rejected() {
        let error = run_jurisdiction(JurisdictionArgs {
            state: "Texas".to_string(),
            json: false,
        })
        .expect_err("invalid shape");
        assert!(matches!(error, AppError::Service(_)));
    }

    #[test]
    fn reconcile_requires_a_readable_csv() {
        let error = run_reconcile(ReconcileArgs {
            csv: PathBuf::from("/definitely/not/here.csv"),
            today: Some(today()),
            json: false,
        })
        .expect_err("missing file");
        assert!(matches!(error, AppError::Import(_)));
    }
}
