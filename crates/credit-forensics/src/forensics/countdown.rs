//! Deadline arithmetic for reporting removal, limitations and dispute windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{add_days, add_years, reporting_removal_date, REPORTING_WINDOW_YEARS};
use super::fields::{DateField, FieldSet};
use super::jurisdiction::{self, DebtInstrument};

/// Days a bureau has to finish a reinvestigation after a dispute is filed.
pub const RESPONSE_WINDOW_DAYS: i64 = 30;
/// Days a consumer has to request validation after receiving a collection notice.
pub const VALIDATION_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownKind {
    ReportingRemoval,
    SolExpiration,
    DisputeDeadline,
    ResponseDeadline,
}

impl CountdownKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReportingRemoval => "reporting_removal",
            Self::SolExpiration => "sol_expiration",
            Self::DisputeDeadline => "dispute_deadline",
            Self::ResponseDeadline => "response_deadline",
        }
    }

    /// `(critical, warning)` day thresholds, inclusive.
    const fn thresholds(self) -> (i64, i64) {
        match self {
            Self::ReportingRemoval => (30, 180),
            Self::SolExpiration => (90, 365),
            Self::DisputeDeadline | Self::ResponseDeadline => (5, 10),
        }
    }
}

/// Ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Expired,
    Critical,
    Warning,
    Normal,
}

impl Urgency {
    pub const fn classify(kind: CountdownKind, days_remaining: i64) -> Self {
        let (critical, warning) = kind.thresholds();
        if days_remaining <= 0 {
            Self::Expired
        } else if days_remaining <= critical {
            Self::Critical
        } else if days_remaining <= warning {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub kind: CountdownKind,
    pub target_date: NaiveDate,
    pub days_remaining: i64,
    pub expired: bool,
    pub urgency: Urgency,
    pub explanation: String,
    pub recommended_action: String,
}

impl Countdown {
    fn new(
        kind: CountdownKind,
        target_date: NaiveDate,
        today: NaiveDate,
        explanation: String,
        action: &str,
        expired_action: &str,
    ) -> Self {
        let days_remaining = (target_date - today).num_days();
        let urgency = Urgency::classify(kind, days_remaining);
        let expired = urgency == Urgency::Expired;
        Self {
            kind,
            target_date,
            days_remaining,
            expired,
            urgency,
            explanation,
            recommended_action: (if expired { expired_action } else { action }).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub label: String,
    pub date: NaiveDate,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineTracker {
    pub countdowns: Vec<Countdown>,
    pub milestones: Vec<Milestone>,
    pub next_action: String,
}

/// Caller-supplied dates and the instrument used for the limitations clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownOptions {
    #[serde(default)]
    pub dispute_filed: Option<NaiveDate>,
    #[serde(default)]
    pub validation_notice_received: Option<NaiveDate>,
    #[serde(default)]
    pub instrument: DebtInstrument,
}

impl CountdownOptions {
    pub fn with_dispute_filed(dispute_filed: Option<NaiveDate>) -> Self {
        Self {
            dispute_filed,
            ..Self::default()
        }
    }
}

pub fn calculate(
    fields: &FieldSet,
    dispute_filed: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Countdown> {
    calculate_with(fields, &CountdownOptions::with_dispute_filed(dispute_filed), today)
}

pub fn calculate_with(
    fields: &FieldSet,
    options: &CountdownOptions,
    today: NaiveDate,
) -> Vec<Countdown> {
    let mut countdowns: Vec<Countdown> = [
        removal_countdown(fields, today),
        sol_countdown(fields, options.instrument, today),
        validation_countdown(options.validation_notice_received, today),
        response_countdown(options.dispute_filed, today),
    ]
    .into_iter()
    .flatten()
    .collect();

    countdowns.sort_by(|a, b| {
        a.urgency
            .cmp(&b.urgency)
            .then(a.days_remaining.cmp(&b.days_remaining))
    });
    countdowns
}

pub fn build_tracker(
    fields: &FieldSet,
    options: &CountdownOptions,
    today: NaiveDate,
) -> DeadlineTracker {
    let countdowns = calculate_with(fields, options, today);
    let milestones = milestones(fields, today);
    let next_action = next_action(&countdowns);
    DeadlineTracker {
        countdowns,
        milestones,
        next_action,
    }
}

fn removal_countdown(fields: &FieldSet, today: NaiveDate) -> Option<Countdown> {
    let removal = fields.dofd().and_then(reporting_removal_date)?;
    let explanation = format!(
        "Date of first delinquency {} plus seven years and 180 days puts the required removal date at {removal}.",
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
    );
    Some(Countdown::new(
        CountdownKind::ReportingRemoval,
        removal,
        today,
        explanation,
        "Track the removal date and confirm the tradeline drops off the report when it arrives.",
        "Dispute the tradeline as obsolete: it is past the date it had to be removed.",
    ))
}

fn sol_countdown(
    fields: &FieldSet,
    instrument: DebtInstrument,
    today: NaiveDate,
) -> Option<Countdown> {
    let state = fields.state_code()?;
    let last_payment = fields.last_payment_date()?;
    let profile = jurisdiction::lookup(&state);
    let years = profile.sol_years(instrument);
    let expiry = add_years(last_payment, years)?;
    let explanation = format!(
        "{} allows {years} years to sue on a {} debt; counted from the last payment on {}, the statute expires {expiry}.",
        profile.state_name,
        instrument.label(),
        fields
            .raw_date(DateField::LastPaymentDate)
            .unwrap_or_default(),
    );
    Some(Countdown::new(
        CountdownKind::SolExpiration,
        expiry,
        today,
        explanation,
        "Avoid payments or written acknowledgements that could restart the limitations period.",
        "The debt is time-barred: respond to any lawsuit by raising the statute of limitations as a defense.",
    ))
}

fn validation_countdown(received: Option<NaiveDate>, today: NaiveDate) -> Option<Countdown> {
    let received = received?;
    let deadline = add_days(received, VALIDATION_WINDOW_DAYS)?;
    Some(Countdown::new(
        CountdownKind::DisputeDeadline,
        deadline,
        today,
        format!(
            "A validation request sent within 30 days of the notice received {received} obliges the collector to pause collection until it validates the debt."
        ),
        "Send a written debt validation request by certified mail before the window closes.",
        "The validation window has closed; a dispute can still be sent but collection need not pause.",
    ))
}

fn response_countdown(filed: Option<NaiveDate>, today: NaiveDate) -> Option<Countdown> {
    let filed = filed?;
    let deadline = add_days(filed, RESPONSE_WINDOW_DAYS)?;
    Some(Countdown::new(
        CountdownKind::ResponseDeadline,
        deadline,
        today,
        format!("The bureau must finish its reinvestigation within 30 days of the dispute filed {filed}."),
        "Watch for the reinvestigation results and keep the dispute confirmation.",
        "The response window has passed; unverified information must be deleted, so file a complaint if it remains.",
    ))
}

fn milestones(fields: &FieldSet, today: NaiveDate) -> Vec<Milestone> {
    let dofd = fields.dofd();
    let candidates = [
        ("Account opened", fields.date_opened()),
        ("Last payment", fields.last_payment_date()),
        ("First delinquency", dofd),
        (
            "Seven years from first delinquency",
            dofd.and_then(|date| add_years(date, REPORTING_WINDOW_YEARS)),
        ),
        ("Required removal", dofd.and_then(reporting_removal_date)),
        ("Charge-off", fields.charge_off_date()),
    ];

    let mut milestones: Vec<Milestone> = candidates
        .into_iter()
        .filter_map(|(label, date)| {
            date.map(|date| Milestone {
                label: label.to_string(),
                date,
                passed: date < today,
            })
        })
        .collect();
    milestones.sort_by_key(|milestone| milestone.date);
    milestones
}

fn next_action(countdowns: &[Countdown]) -> String {
    let next = countdowns
        .iter()
        .filter(|countdown| !countdown.expired)
        .min_by_key(|countdown| countdown.days_remaining)
        .or_else(|| countdowns.first());

    match next {
        Some(countdown) if countdown.expired => format!(
            "{} ({} passed {})",
            countdown.recommended_action,
            countdown.kind.label(),
            countdown.target_date
        ),
        Some(countdown) => format!(
            "{} ({} days until {})",
            countdown.recommended_action,
            countdown.days_remaining,
            countdown.kind.label()
        ),
        None => "No deadlines apply to this account.".to_string(),
    }
}
