use super::{IndicatorTally, Pattern, PatternContext, PatternKind};
use crate::forensics::dates::years_between;
use crate::forensics::fields::{format_amount, DateField};
use crate::forensics::flags::RuleId;

const ACTIVE_REPORTING_DAYS: i64 = 90;
const STALE_REPORTING_DAYS: i64 = 365;
const REAGING_PAYMENT_GAP_DAYS: i64 = 180;

struct PatternText {
    name: &'static str,
    description: &'static str,
    legal_basis: &'static [&'static str],
    recommendation: &'static str,
}

fn text(kind: PatternKind) -> PatternText {
    match kind {
        PatternKind::ZombieDebt => PatternText {
            name: "Zombie Debt",
            description: "A debt that is past its reporting window or statute of limitations is still being reported or collected.",
            legal_basis: &["15 U.S.C. § 1681c(a)(4)", "15 U.S.C. § 1692e(2)(A)", "12 C.F.R. § 1006.26(b)"],
            recommendation: "Demand deletion of the tradeline as obsolete and send a written notice that the debt is time-barred. Do not make any payment before confirming whether a payment would revive the limitations period.",
        },
        PatternKind::SystematicReaging => PatternText {
            name: "Systematic Re-Aging",
            description: "The account's timeline has been shifted so the debt appears newer than it is, extending how long it can be reported.",
            legal_basis: &["15 U.S.C. § 1681c(c)", "15 U.S.C. § 1681s-2(a)(5)", "15 U.S.C. § 1681e(b)"],
            recommendation: "Dispute the date of first delinquency with every bureau, attach the original creditor's statements showing the true delinquency date, and request the method of verification.",
        },
        PatternKind::BalanceInflation => PatternText {
            name: "Balance Inflation",
            description: "The reported balance has grown faster than the original obligation and applicable rate limits allow.",
            legal_basis: &["15 U.S.C. § 1692f(1)", "15 U.S.C. § 1681s-2(a)(1)(A)"],
            recommendation: "Request a full itemization of the balance from the furnisher and dispute any interest or fees not authorized by the agreement or state law.",
        },
        PatternKind::PhantomDebt => PatternText {
            name: "Phantom Debt",
            description: "The account carries a balance that cannot be traced to a documented origin or has already been resolved.",
            legal_basis: &["15 U.S.C. § 1692g(b)", "15 U.S.C. § 1681i(a)(5)(A)"],
            recommendation: "Send a debt validation request for the original agreement and a complete payment history, and dispute the balance as unverifiable until it is produced.",
        },
        PatternKind::CollectionStacking => PatternText {
            name: "Collection Stacking",
            description: "The same obligation appears to be reported by more than one furnisher, multiplying its impact on the file.",
            legal_basis: &["15 U.S.C. § 1681e(b)", "15 U.S.C. § 1681s-2(a)(1)(A)"],
            recommendation: "Identify every tradeline tied to the original account and dispute all but the current owner's entry as duplicate reporting.",
        },
        PatternKind::StatusManipulation => PatternText {
            name: "Status Manipulation",
            description: "The reported status contradicts the account's own history or dates.",
            legal_basis: &["15 U.S.C. § 1681s-2(a)(2)", "15 U.S.C. § 1681e(b)"],
            recommendation: "Dispute the status field together with the conflicting history entries and ask the bureau to correct whichever element is inaccurate.",
        },
        PatternKind::StaleReporting => PatternText {
            name: "Stale Reporting",
            description: "The tradeline has not been maintained and its data is outdated or incomplete.",
            legal_basis: &["15 U.S.C. § 1681e(b)", "15 U.S.C. § 1681s-2(a)(2)"],
            recommendation: "Dispute the tradeline as incomplete and request that the furnisher update or delete the outdated information.",
        },
    }
}

pub(super) fn tally(kind: PatternKind, context: &PatternContext<'_>) -> IndicatorTally {
    match kind {
        PatternKind::ZombieDebt => zombie_debt(context),
        PatternKind::SystematicReaging => systematic_reaging(context),
        PatternKind::BalanceInflation => balance_inflation(context),
        PatternKind::PhantomDebt => phantom_debt(context),
        PatternKind::CollectionStacking => collection_stacking(context),
        PatternKind::StatusManipulation => status_manipulation(context),
        PatternKind::StaleReporting => stale_reporting(context),
    }
}

pub(super) fn build_pattern(kind: PatternKind, confidence: u8, tally: IndicatorTally) -> Pattern {
    let text = text(kind);
    Pattern {
        kind,
        name: text.name.to_string(),
        description: text.description.to_string(),
        confidence,
        severity: kind.severity(),
        evidence: tally.evidence,
        legal_basis: text.legal_basis.iter().map(|cite| cite.to_string()).collect(),
        matched_rules: tally.matched_rules,
        recommendation: text.recommendation.to_string(),
    }
}

fn raw(context: &PatternContext<'_>, field: DateField) -> String {
    context
        .fields
        .raw_date(field)
        .unwrap_or_default()
        .to_string()
}

fn zombie_debt(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::ReportingLimitExceeded, 35);
    tally.rule(context.flags, RuleId::StatuteExpired, 30);

    let dofd_age = context
        .fields
        .dofd()
        .map(|dofd| years_between(dofd, context.today));
    if let Some(age) = dofd_age {
        let dofd = raw(context, DateField::Dofd);
        if age > 7.0 {
            tally.add(25, format!("DOFD {dofd} is {age:.1} years old, beyond the seven-year reporting window"));
        } else if age > 5.0 {
            tally.add(15, format!("DOFD {dofd} is {age:.1} years old"));
        }
    }

    if context.fields.is_collection() {
        tally.add(10, "Account is reported as a collection".to_string());
    }

    if let (Some(age), Some(reported)) = (dofd_age, context.fields.date_last_reported()) {
        let since_reported = (context.today - reported).num_days();
        if age > 7.0 && (0..=ACTIVE_REPORTING_DAYS).contains(&since_reported) {
            tally.add(
                20,
                format!(
                    "Still actively reported on {} although the DOFD is more than seven years old",
                    raw(context, DateField::DateLastReported)
                ),
            );
        }
    }
    tally
}

fn systematic_reaging(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::DofdBeforeOpened, 30);
    tally.rule(context.flags, RuleId::ExcessiveReportingSpan, 35);
    tally.rule(context.flags, RuleId::DofdAfterChargeOff, 30);
    tally.rule(context.flags, RuleId::FutureDate, 25);

    if let (Some(dofd), Some(last_payment)) =
        (context.fields.dofd(), context.fields.last_payment_date())
    {
        let gap = (dofd - last_payment).num_days();
        if gap > REAGING_PAYMENT_GAP_DAYS {
            tally.add(
                20,
                format!(
                    "DOFD {} falls {gap} days after the last payment on {}",
                    raw(context, DateField::Dofd),
                    raw(context, DateField::LastPaymentDate)
                ),
            );
        }
    }
    tally
}

fn balance_inflation(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::BalanceInflation, 35);

    if let (Some(current), Some(original)) = (
        context.fields.current_balance(),
        context.fields.original_amount(),
    ) {
        if original > 0.0 {
            let ratio = current / original;
            let detail = format!(
                "Balance {} is {ratio:.2}x the original amount {}",
                format_amount(current),
                format_amount(original)
            );
            if ratio > 2.0 {
                tally.add(25, detail);
            } else if ratio > 1.5 {
                tally.add(15, detail);
            }
        }
    }

    tally.rule(context.flags, RuleId::InterestCapExceeded, 30);
    tally
}

fn phantom_debt(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::PaidWithBalance, 35);
    tally.rule(context.flags, RuleId::TransferredWithBalance, 35);

    let balance = context
        .fields
        .current_balance()
        .filter(|balance| *balance > 0.0);
    if let Some(balance) = balance {
        let amount = format_amount(balance);
        if context.fields.original_amount().is_none() {
            tally.add(15, format!("Balance {amount} is reported with no original amount"));
        }
        if context.fields.date_opened().is_none() {
            tally.add(15, format!("Balance {amount} is reported with no date opened"));
        }
        if context.fields.creditor_name.is_none() {
            tally.add(15, format!("Balance {amount} is reported with no original creditor"));
        }
    }
    tally
}

fn collection_stacking(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::TransferredWithBalance, 40);

    if context.fields.is_collection() {
        if let (Some(furnisher), Some(creditor)) = (
            context.fields.furnisher_name.as_deref(),
            context.fields.creditor_name.as_deref(),
        ) {
            if !furnisher.trim().eq_ignore_ascii_case(creditor.trim()) {
                tally.add(
                    20,
                    format!("Collection furnished by {furnisher} for original creditor {creditor}"),
                );
            }
        }
    }

    if context.fields.status_indicates_transfer() {
        tally.add(
            15,
            format!(
                "Status \"{}\" shows the account changed hands",
                context.fields.account_status.as_deref().unwrap_or_default()
            ),
        );
    }
    tally
}

fn status_manipulation(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();
    tally.rule(context.flags, RuleId::StatusHistoryConflict, 35);
    tally.rule(context.flags, RuleId::PaidWithBalance, 20);

    if context.fields.status_is_clean() && context.fields.charge_off_date().is_some() {
        tally.add(
            25,
            format!(
                "Status \"{}\" is reported alongside a charge-off dated {}",
                context.fields.account_status.as_deref().unwrap_or_default(),
                raw(context, DateField::ChargeOffDate)
            ),
        );
    }
    tally
}

fn stale_reporting(context: &PatternContext<'_>) -> IndicatorTally {
    let mut tally = IndicatorTally::default();

    if let Some(reported) = context.fields.date_last_reported() {
        let days = (context.today - reported).num_days();
        if days > STALE_REPORTING_DAYS {
            tally.add(
                25,
                format!(
                    "Last reported {} ({days} days ago)",
                    raw(context, DateField::DateLastReported)
                ),
            );
        }
    }

    tally.rule(context.flags, RuleId::ReportingLimitExceeded, 30);
    tally.rule(context.flags, RuleId::MissingDofd, 20);
    tally
}
