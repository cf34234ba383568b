use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity tier shared by flags and patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// High or critical.
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Identifier of one entry in the rule catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "B1")]
    DofdBeforeOpened,
    #[serde(rename = "B2")]
    ExcessiveReportingSpan,
    #[serde(rename = "B3")]
    DofdAfterChargeOff,
    #[serde(rename = "E1")]
    FutureDate,
    #[serde(rename = "K7")]
    ReportingLimitExceeded,
    #[serde(rename = "D1")]
    PaidWithBalance,
    #[serde(rename = "D2")]
    TransferredWithBalance,
    #[serde(rename = "F1")]
    BalanceInflation,
    #[serde(rename = "H1")]
    MedicalBelowThreshold,
    #[serde(rename = "M2")]
    MissingDofd,
    #[serde(rename = "C1")]
    StatusHistoryConflict,
    #[serde(rename = "L1")]
    InterestCapExceeded,
    #[serde(rename = "S1")]
    StatuteExpired,
}

impl RuleId {
    pub const fn all() -> [Self; 13] {
        [
            Self::DofdBeforeOpened,
            Self::ExcessiveReportingSpan,
            Self::DofdAfterChargeOff,
            Self::FutureDate,
            Self::ReportingLimitExceeded,
            Self::PaidWithBalance,
            Self::TransferredWithBalance,
            Self::BalanceInflation,
            Self::MedicalBelowThreshold,
            Self::MissingDofd,
            Self::StatusHistoryConflict,
            Self::InterestCapExceeded,
            Self::StatuteExpired,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::DofdBeforeOpened => "B1",
            Self::ExcessiveReportingSpan => "B2",
            Self::DofdAfterChargeOff => "B3",
            Self::FutureDate => "E1",
            Self::ReportingLimitExceeded => "K7",
            Self::PaidWithBalance => "D1",
            Self::TransferredWithBalance => "D2",
            Self::BalanceInflation => "F1",
            Self::MedicalBelowThreshold => "H1",
            Self::MissingDofd => "M2",
            Self::StatusHistoryConflict => "C1",
            Self::InterestCapExceeded => "L1",
            Self::StatuteExpired => "S1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(code))
    }

    /// Date-logic rules whose co-occurrence signals re-aging.
    pub const fn is_timeline(self) -> bool {
        matches!(
            self,
            Self::DofdBeforeOpened
                | Self::ExcessiveReportingSpan
                | Self::DofdAfterChargeOff
                | Self::FutureDate
                | Self::ReportingLimitExceeded
        )
    }

    /// Timeline or internal-logic errors that automated verification cannot paper over.
    pub const fn is_technical(self) -> bool {
        self.is_timeline() || matches!(self, Self::StatusHistoryConflict)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    Timeline,
    Balance,
    Medical,
    MissingData,
    Consistency,
    Jurisdiction,
}

impl FlagCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timeline => "Timeline",
            Self::Balance => "Balance",
            Self::Medical => "Medical Debt",
            Self::MissingData => "Missing Data",
            Self::Consistency => "Consistency",
            Self::Jurisdiction => "Jurisdiction",
        }
    }
}

/// Typed value recorded as evidence on a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EvidenceValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl fmt::Display for EvidenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceValue::Text(text) => f.write_str(text),
            EvidenceValue::Number(number) => write!(f, "{number}"),
            EvidenceValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for EvidenceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EvidenceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for EvidenceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for EvidenceValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// One rule finding. Built once by the rule engine and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub severity: Severity,
    pub explanation: String,
    pub why_it_matters: String,
    pub suggested_evidence: Vec<String>,
    pub field_values: BTreeMap<String, EvidenceValue>,
    pub legal_citations: Vec<String>,
    pub category: FlagCategory,
    pub confidence: u8,
    pub success_probability: u8,
}

impl Flag {
    pub fn is_technical(&self) -> bool {
        self.rule_id.is_technical()
    }
}

pub fn has_rule(flags: &[Flag], rule: RuleId) -> bool {
    flags.iter().any(|flag| flag.rule_id == rule)
}

pub fn count_severity(flags: &[Flag], severity: Severity) -> usize {
    flags.iter().filter(|flag| flag.severity == severity).count()
}
