use super::super::dates::{add_days, reporting_removal_date, years_between};
use super::super::fields::DateField;
use super::super::flags::{Flag, RuleId};
use super::{FlagBuilder, RuleContext};

const MAX_REPORTING_SPAN_YEARS: f64 = 7.5;

const FUTURE_CHECKED_FIELDS: [DateField; 5] = [
    DateField::DateOpened,
    DateField::DateLastReported,
    DateField::Dofd,
    DateField::ChargeOffDate,
    DateField::LastPaymentDate,
];

pub(super) fn dofd_before_opened(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(dofd), Some(opened)) = (fields.dofd(), fields.date_opened()) else {
        return Vec::new();
    };
    if dofd >= opened {
        return Vec::new();
    }

    let explanation = format!(
        "Date of first delinquency {} is earlier than the account open date {}; an account cannot be delinquent before it exists.",
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
        fields.raw_date(DateField::DateOpened).unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::DofdBeforeOpened, explanation)
        .value(DateField::Dofd.key(), dofd)
        .value(DateField::DateOpened.key(), opened)
        .build()]
}

pub(super) fn excessive_reporting_span(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(dofd), Some(removal)) = (fields.dofd(), fields.estimated_removal_date()) else {
        return Vec::new();
    };
    let span = years_between(dofd, removal);
    if span <= MAX_REPORTING_SPAN_YEARS {
        return Vec::new();
    }

    let explanation = format!(
        "Estimated removal date {} is {:.1} years after the date of first delinquency {}, beyond the 7.5-year maximum (7 years plus 180 days).",
        fields.raw_date(DateField::EstimatedRemovalDate).unwrap_or_default(),
        span,
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::ExcessiveReportingSpan, explanation)
        .value(DateField::Dofd.key(), dofd)
        .value(DateField::EstimatedRemovalDate.key(), removal)
        .value("reportingSpanYears", (span * 10.0).round() / 10.0)
        .build()]
}

pub(super) fn dofd_after_charge_off(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(dofd), Some(charge_off)) = (fields.dofd(), fields.charge_off_date()) else {
        return Vec::new();
    };
    if dofd <= charge_off {
        return Vec::new();
    }

    let explanation = format!(
        "Date of first delinquency {} falls after the charge-off date {}; delinquency must precede a charge-off.",
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
        fields.raw_date(DateField::ChargeOffDate).unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::DofdAfterChargeOff, explanation)
        .value(DateField::Dofd.key(), dofd)
        .value(DateField::ChargeOffDate.key(), charge_off)
        .build()]
}

/// One flag per date field more than a day ahead of today.
pub(super) fn future_dates(context: &RuleContext<'_>) -> Vec<Flag> {
    let Some(horizon) = add_days(context.today, 1) else {
        return Vec::new();
    };

    FUTURE_CHECKED_FIELDS
        .into_iter()
        .filter_map(|field| {
            let date = context.fields.date(field)?;
            if date <= horizon {
                return None;
            }
            let explanation = format!(
                "{} {} is in the future (evaluated {}).",
                field.label(),
                context.fields.raw_date(field).unwrap_or_default(),
                context.today.format("%Y-%m-%d"),
            );
            Some(
                FlagBuilder::new(RuleId::FutureDate, explanation)
                    .value(field.key(), date)
                    .value("evaluatedOn", context.today)
                    .build(),
            )
        })
        .collect()
}

pub(super) fn reporting_limit_exceeded(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let Some(dofd) = fields.dofd() else {
        return Vec::new();
    };
    let Some(expected_removal) = reporting_removal_date(dofd) else {
        return Vec::new();
    };
    if expected_removal >= context.today {
        return Vec::new();
    }

    let overdue_days = (context.today - expected_removal).num_days();
    let explanation = format!(
        "Date of first delinquency {} puts the expected removal date at {}; the account should have been deleted {} days ago.",
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
        expected_removal.format("%Y-%m-%d"),
        overdue_days,
    );
    vec![FlagBuilder::new(RuleId::ReportingLimitExceeded, explanation)
        .value(DateField::Dofd.key(), dofd)
        .value("expectedRemovalDate", expected_removal)
        .value("daysOverdue", overdue_days as f64)
        .build()]
}
