use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::dates::parse_date;

/// One tradeline as extracted from a credit report, plus consumer context.
///
/// Every attribute is optional and kept in its raw textual form so explanations
/// can quote exactly what the report said. Typed accessors parse on demand and
/// treat malformed values as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSet {
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub creditor_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub furnisher_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub date_opened: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub dofd: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub charge_off_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub date_last_reported: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub estimated_removal_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub payment_history: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub bureau: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

/// Date-valued attributes of a [`FieldSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    DateOpened,
    DateLastReported,
    Dofd,
    ChargeOffDate,
    LastPaymentDate,
    EstimatedRemovalDate,
}

impl DateField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::DateOpened => "dateOpened",
            Self::DateLastReported => "dateLastReported",
            Self::Dofd => "dofd",
            Self::ChargeOffDate => "chargeOffDate",
            Self::LastPaymentDate => "lastPaymentDate",
            Self::EstimatedRemovalDate => "estimatedRemovalDate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DateOpened => "Date Opened",
            Self::DateLastReported => "Date Last Reported",
            Self::Dofd => "Date of First Delinquency",
            Self::ChargeOffDate => "Charge-Off Date",
            Self::LastPaymentDate => "Last Payment Date",
            Self::EstimatedRemovalDate => "Estimated Removal Date",
        }
    }
}

const MEDICAL_MARKERS: &[&str] = &[
    "medical",
    "hospital",
    "health",
    "clinic",
    "physician",
    "radiology",
    "ambulance",
    "anesthesia",
    "emergency room",
    "urgent care",
    "pathology",
    "dental",
];

impl FieldSet {
    pub fn raw_date(&self, field: DateField) -> Option<&str> {
        let raw = match field {
            DateField::DateOpened => &self.date_opened,
            DateField::DateLastReported => &self.date_last_reported,
            DateField::Dofd => &self.dofd,
            DateField::ChargeOffDate => &self.charge_off_date,
            DateField::LastPaymentDate => &self.last_payment_date,
            DateField::EstimatedRemovalDate => &self.estimated_removal_date,
        };
        raw.as_deref()
    }

    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        self.raw_date(field).and_then(parse_date)
    }

    pub fn dofd(&self) -> Option<NaiveDate> {
        self.date(DateField::Dofd)
    }

    pub fn date_opened(&self) -> Option<NaiveDate> {
        self.date(DateField::DateOpened)
    }

    pub fn charge_off_date(&self) -> Option<NaiveDate> {
        self.date(DateField::ChargeOffDate)
    }

    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.date(DateField::LastPaymentDate)
    }

    pub fn date_last_reported(&self) -> Option<NaiveDate> {
        self.date(DateField::DateLastReported)
    }

    pub fn estimated_removal_date(&self) -> Option<NaiveDate> {
        self.date(DateField::EstimatedRemovalDate)
    }

    pub fn current_balance(&self) -> Option<f64> {
        self.current_balance.as_deref().and_then(parse_amount)
    }

    pub fn original_amount(&self) -> Option<f64> {
        self.original_amount.as_deref().and_then(parse_amount)
    }

    pub fn state_code(&self) -> Option<String> {
        self.state_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase)
    }

    pub fn status_text(&self) -> String {
        self.account_status
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    pub fn type_text(&self) -> String {
        self.account_type
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Medical if the account type, furnisher or creditor says so.
    pub fn is_medical(&self) -> bool {
        [&self.account_type, &self.furnisher_name, &self.creditor_name]
            .into_iter()
            .flatten()
            .map(|text| text.to_ascii_lowercase())
            .any(|text| MEDICAL_MARKERS.iter().any(|marker| text.contains(marker)))
    }

    pub fn is_collection(&self) -> bool {
        self.type_text().contains("collection") || self.status_text().contains("collection")
    }

    pub fn is_collection_or_charge_off(&self) -> bool {
        let account_type = self.type_text();
        let status = self.status_text();
        self.is_collection()
            || account_type.contains("charge")
            || status.contains("charge-off")
            || status.contains("charged off")
            || status.contains("charge off")
    }

    /// Paid, settled or explicitly zero-balance status text.
    pub fn status_indicates_paid(&self) -> bool {
        let status = self.status_text();
        if status.contains("unpaid") {
            return false;
        }
        ["paid", "settled", "zero balance", "$0 balance"]
            .iter()
            .any(|marker| status.contains(marker))
    }

    pub fn status_indicates_transfer(&self) -> bool {
        let status = self.status_text();
        ["transferred", "sold", "purchased by"]
            .iter()
            .any(|marker| status.contains(marker))
    }

    /// Current, paid or on-time status text.
    pub fn status_is_clean(&self) -> bool {
        let status = self.status_text();
        if status.contains("unpaid") || status.contains("past due") {
            return false;
        }
        ["current", "paid", "on time", "on-time", "pays as agreed"]
            .iter()
            .any(|marker| status.contains(marker))
    }

    pub fn creditor_label(&self) -> &str {
        self.creditor_name
            .as_deref()
            .or(self.furnisher_name.as_deref())
            .unwrap_or("Unknown creditor")
    }
}

/// Parse a currency amount such as `"$1,250.00"`.
///
/// Non-numeric input yields `None`, which the rules treat as a missing value.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("USD")
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn format_amount(value: f64) -> String {
    format!("${value:.2}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Accept strings or bare JSON numbers, dropping blank values.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(value
        .map(|value| match value {
            LooseValue::Text(text) => text,
            LooseValue::Integer(number) => number.to_string(),
            LooseValue::Float(number) => number.to_string(),
            LooseValue::Flag(flag) => flag.to_string(),
        })
        .filter(|text| !text.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_tolerate_currency_formatting() {
        assert_eq!(parse_amount("$1,250.50"), Some(1250.5));
        assert_eq!(parse_amount(" 300 "), Some(300.0));
        assert_eq!(parse_amount("USD 42"), Some(42.0));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn deserializes_camel_case_and_numeric_values() {
        let fields: FieldSet = serde_json::from_value(serde_json::json!({
            "creditorName": "Midland Credit",
            "currentBalance": 1200,
            "originalAmount": "",
            "dofd": "2019-04-01",
            "stateCode": "ca"
        }))
        .expect("field set deserializes");

        assert_eq!(fields.creditor_name.as_deref(), Some("Midland Credit"));
        assert_eq!(fields.current_balance(), Some(1200.0));
        assert_eq!(fields.original_amount, None);
        assert_eq!(fields.state_code().as_deref(), Some("CA"));
    }

    #[test]
    fn status_helpers_distinguish_unpaid_from_paid() {
        let paid = FieldSet {
            account_status: Some("Paid in full".to_string()),
            ..FieldSet::default()
        };
        let unpaid = FieldSet {
            account_status: Some("Unpaid collection".to_string()),
            ..FieldSet::default()
        };

        assert!(paid.status_indicates_paid());
        assert!(paid.status_is_clean());
        assert!(!unpaid.status_indicates_paid());
        assert!(!unpaid.status_is_clean());
        assert!(unpaid.is_collection_or_charge_off());
    }

    #[test]
    fn medical_detection_reads_furnisher_and_type() {
        let fields = FieldSet {
            furnisher_name: Some("Mercy Hospital Billing".to_string()),
            ..FieldSet::default()
        };
        assert!(fields.is_medical());
        assert!(!FieldSet::default().is_medical());
    }
}
