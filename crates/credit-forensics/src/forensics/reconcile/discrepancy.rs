use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::normalizer::{normalize_amount, normalize_date, normalize_text};
use super::Bureau;
use crate::forensics::fields::{parse_amount, FieldSet};

/// Spread above which a balance mismatch stops being a rounding issue.
pub const SIGNIFICANT_BALANCE_SPREAD: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonField {
    Dofd,
    DateOpened,
    ChargeOffDate,
    CurrentBalance,
    OriginalAmount,
    AccountStatus,
    EstimatedRemovalDate,
    LastPaymentDate,
}

impl ComparisonField {
    pub const fn all() -> [Self; 8] {
        [
            Self::Dofd,
            Self::DateOpened,
            Self::ChargeOffDate,
            Self::CurrentBalance,
            Self::OriginalAmount,
            Self::AccountStatus,
            Self::EstimatedRemovalDate,
            Self::LastPaymentDate,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Dofd => "dofd",
            Self::DateOpened => "dateOpened",
            Self::ChargeOffDate => "chargeOffDate",
            Self::CurrentBalance => "currentBalance",
            Self::OriginalAmount => "originalAmount",
            Self::AccountStatus => "accountStatus",
            Self::EstimatedRemovalDate => "estimatedRemovalDate",
            Self::LastPaymentDate => "lastPaymentDate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dofd => "date of first delinquency",
            Self::DateOpened => "date opened",
            Self::ChargeOffDate => "charge-off date",
            Self::CurrentBalance => "current balance",
            Self::OriginalAmount => "original amount",
            Self::AccountStatus => "account status",
            Self::EstimatedRemovalDate => "estimated removal date",
            Self::LastPaymentDate => "last payment date",
        }
    }

    fn raw<'a>(self, fields: &'a FieldSet) -> Option<&'a str> {
        let value = match self {
            Self::Dofd => &fields.dofd,
            Self::DateOpened => &fields.date_opened,
            Self::ChargeOffDate => &fields.charge_off_date,
            Self::CurrentBalance => &fields.current_balance,
            Self::OriginalAmount => &fields.original_amount,
            Self::AccountStatus => &fields.account_status,
            Self::EstimatedRemovalDate => &fields.estimated_removal_date,
            Self::LastPaymentDate => &fields.last_payment_date,
        };
        value.as_deref()
    }

    /// Value as compared across bureaus, so equal data in different formats matches.
    fn normalized(self, fields: &FieldSet) -> Option<String> {
        let raw = self.raw(fields)?;
        let value = match self {
            Self::CurrentBalance | Self::OriginalAmount => normalize_amount(raw),
            Self::AccountStatus => normalize_text(raw),
            _ => normalize_date(raw),
        };
        Some(value).filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancySeverity {
    Critical,
    Significant,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    pub field: ComparisonField,
    pub values: BTreeMap<Bureau, String>,
    pub severity: DiscrepancySeverity,
    pub explanation: String,
    pub recommendation: String,
}

pub(super) fn find_discrepancies(accounts: &BTreeMap<Bureau, FieldSet>) -> Vec<Discrepancy> {
    ComparisonField::all()
        .into_iter()
        .filter_map(|field| discrepancy_for(field, accounts))
        .collect()
}

fn discrepancy_for(
    field: ComparisonField,
    accounts: &BTreeMap<Bureau, FieldSet>,
) -> Option<Discrepancy> {
    let values: BTreeMap<Bureau, String> = accounts
        .iter()
        .filter_map(|(bureau, fields)| field.normalized(fields).map(|value| (*bureau, value)))
        .collect();

    let distinct: BTreeSet<&String> = values.values().collect();
    if distinct.len() < 2 {
        return None;
    }

    let reported = values
        .iter()
        .map(|(bureau, value)| format!("{} reports {value}", bureau.label()))
        .collect::<Vec<_>>()
        .join("; ");

    let (severity, explanation, recommendation) = match field {
        ComparisonField::Dofd | ComparisonField::EstimatedRemovalDate => (
            DiscrepancySeverity::Critical,
            format!(
                "The bureaus disagree on the {} ({reported}). A shifted delinquency clock is the signature of re-aging.",
                field.label()
            ),
            "Dispute the later date with every bureau and demand the furnisher certify the original delinquency date.".to_string(),
        ),
        ComparisonField::CurrentBalance => {
            let spread = balance_spread(accounts);
            let severity = if spread > SIGNIFICANT_BALANCE_SPREAD {
                DiscrepancySeverity::Significant
            } else {
                DiscrepancySeverity::Minor
            };
            (
                severity,
                format!(
                    "The reported balance differs by ${spread:.2} across bureaus ({reported})."
                ),
                "Request an itemized balance from the furnisher and dispute the figures that do not match it.".to_string(),
            )
        }
        ComparisonField::AccountStatus => (
            DiscrepancySeverity::Significant,
            format!("The bureaus report conflicting account statuses ({reported})."),
            "Dispute the status with the bureaus whose entry is inaccurate and attach proof of the true status.".to_string(),
        ),
        ComparisonField::DateOpened
        | ComparisonField::ChargeOffDate
        | ComparisonField::LastPaymentDate => (
            DiscrepancySeverity::Significant,
            format!(
                "The {} is inconsistent across bureaus ({reported}).",
                field.label()
            ),
            format!(
                "Dispute the {} with each bureau and request the furnisher's records for it.",
                field.label()
            ),
        ),
        ComparisonField::OriginalAmount => (
            DiscrepancySeverity::Minor,
            format!(
                "The {} is reported differently across bureaus ({reported}).",
                field.label()
            ),
            "Ask the bureaus to reconcile the figure with the furnisher's records.".to_string(),
        ),
    };

    Some(Discrepancy {
        field,
        values,
        severity,
        explanation,
        recommendation,
    })
}

fn balance_spread(accounts: &BTreeMap<Bureau, FieldSet>) -> f64 {
    let balances: Vec<f64> = accounts
        .values()
        .filter_map(|fields| fields.current_balance.as_deref().and_then(parse_amount))
        .collect();
    let max = balances.iter().copied().fold(f64::MIN, f64::max);
    let min = balances.iter().copied().fold(f64::MAX, f64::min);
    if balances.len() < 2 {
        0.0
    } else {
        max - min
    }
}
