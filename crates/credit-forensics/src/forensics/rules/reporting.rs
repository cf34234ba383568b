use super::super::fields::DateField;
use super::super::flags::{Flag, RuleId};
use super::{FlagBuilder, RuleContext};

const MEDICAL_REPORTING_THRESHOLD: f64 = 500.0;

/// Number of leading payment-history tokens (most recent months) inspected for late markers.
pub const LEAD_HISTORY_TOKENS: usize = 12;

const DELINQUENCY_MARKERS: &[&str] = &["30", "60", "90", "120", "150", "180"];

pub(super) fn medical_below_threshold(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let Some(balance) = fields.current_balance() else {
        return Vec::new();
    };
    if !fields.is_medical() || balance <= 0.0 || balance >= MEDICAL_REPORTING_THRESHOLD {
        return Vec::new();
    }

    let explanation = format!(
        "Medical account from {} reports a balance of {}, below the $500 medical reporting threshold.",
        fields.creditor_label(),
        fields.current_balance.as_deref().unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::MedicalBelowThreshold, explanation)
        .value("creditorName", fields.creditor_label())
        .value("currentBalance", balance)
        .build()]
}

pub(super) fn missing_dofd(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    if !fields.is_collection_or_charge_off() || fields.dofd().is_some() {
        return Vec::new();
    }

    let account_type = fields.account_type.as_deref().unwrap_or("not reported");
    let status = fields.account_status.as_deref().unwrap_or("not reported");
    let explanation = format!(
        "Account type \"{}\" with status \"{}\" is a collection or charge-off, but no valid {} is reported (value: {}).",
        account_type,
        status,
        DateField::Dofd.label(),
        fields.raw_date(DateField::Dofd).unwrap_or("blank"),
    );
    vec![FlagBuilder::new(RuleId::MissingDofd, explanation)
        .value("accountType", account_type)
        .value("accountStatus", status)
        .build()]
}

pub(super) fn status_history_conflict(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let Some(history) = fields.payment_history.as_deref() else {
        return Vec::new();
    };
    if !fields.status_is_clean() {
        return Vec::new();
    }

    let markers = lead_delinquency_markers(history);
    if markers.is_empty() {
        return Vec::new();
    }

    let status = fields.account_status.as_deref().unwrap_or_default();
    let explanation = format!(
        "Status \"{}\" reports the account as current or paid, but the payment history \"{}\" shows {}-day late markers among the most recent {} entries.",
        status,
        history,
        markers.join("/"),
        LEAD_HISTORY_TOKENS,
    );
    vec![FlagBuilder::new(RuleId::StatusHistoryConflict, explanation)
        .value("accountStatus", status)
        .value("paymentHistory", history)
        .value("lateMarkers", markers.join(","))
        .build()]
}

/// Distinct late markers among the leading history tokens, in first-seen order.
pub(crate) fn lead_delinquency_markers(history: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    let tokens = history
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .take(LEAD_HISTORY_TOKENS);

    for token in tokens {
        if let Some(marker) = DELINQUENCY_MARKERS.iter().find(|marker| **marker == token) {
            if !found.contains(marker) {
                found.push(*marker);
            }
        }
    }

    found
}
