use super::super::flags::{Flag, RuleId};
use super::{FlagBuilder, RuleContext};

const INFLATION_RATIO: f64 = 1.5;

pub(super) fn balance_inflation(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(current), Some(original)) = (fields.current_balance(), fields.original_amount())
    else {
        return Vec::new();
    };
    if original <= 0.0 || current <= original * INFLATION_RATIO {
        return Vec::new();
    }

    let increase_pct = (current - original) / original * 100.0;
    let explanation = format!(
        "Current balance {} is {:.1}% higher than the original amount {}.",
        fields.current_balance.as_deref().unwrap_or_default(),
        increase_pct,
        fields.original_amount.as_deref().unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::BalanceInflation, explanation)
        .value("currentBalance", current)
        .value("originalAmount", original)
        .value("increasePercent", (increase_pct * 10.0).round() / 10.0)
        .build()]
}

pub(super) fn paid_with_balance(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let Some(balance) = fields.current_balance() else {
        return Vec::new();
    };
    if balance <= 0.0 || !fields.status_indicates_paid() {
        return Vec::new();
    }

    let status = fields.account_status.as_deref().unwrap_or_default();
    let explanation = format!(
        "Account status \"{}\" shows the debt as paid or settled, yet a balance of {} is still reported.",
        status,
        fields.current_balance.as_deref().unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::PaidWithBalance, explanation)
        .value("accountStatus", status)
        .value("currentBalance", balance)
        .build()]
}

pub(super) fn transferred_with_balance(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let Some(balance) = fields.current_balance() else {
        return Vec::new();
    };
    if balance <= 0.0 || !fields.status_indicates_transfer() {
        return Vec::new();
    }

    let status = fields.account_status.as_deref().unwrap_or_default();
    let explanation = format!(
        "Account status \"{}\" shows the debt was transferred or sold, but a balance of {} is still reported; the balance must be zero after transfer.",
        status,
        fields.current_balance.as_deref().unwrap_or_default(),
    );
    vec![FlagBuilder::new(RuleId::TransferredWithBalance, explanation)
        .value("accountStatus", status)
        .value("currentBalance", balance)
        .build()]
}
