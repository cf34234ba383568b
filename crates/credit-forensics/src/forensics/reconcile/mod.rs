//! Cross-bureau reconciliation of the same logical account.

mod discrepancy;
mod normalizer;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::FieldSet;
use super::flags::{Flag, Severity};
use super::rules::RuleEngine;

pub use discrepancy::{ComparisonField, Discrepancy, DiscrepancySeverity, SIGNIFICANT_BALANCE_SPREAD};
pub use normalizer::{creditor_key, UNKNOWN_CREDITOR_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bureau {
    Experian,
    Equifax,
    #[serde(alias = "trans_union")]
    TransUnion,
}

impl Bureau {
    pub const fn all() -> [Self; 3] {
        [Self::Experian, Self::Equifax, Self::TransUnion]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Experian => "Experian",
            Self::Equifax => "Equifax",
            Self::TransUnion => "TransUnion",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "experian" | "exp" | "ex" => Some(Self::Experian),
            "equifax" | "eqf" | "eq" => Some(Self::Equifax),
            "transunion" | "tu" | "tru" => Some(Self::TransUnion),
            _ => None,
        }
    }
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered most serious first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonRisk {
    High,
    Medium,
    Low,
}

impl ComparisonRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauComparison {
    pub creditor_key: String,
    pub creditor_name: String,
    pub accounts: BTreeMap<Bureau, FieldSet>,
    pub flags: BTreeMap<Bureau, Vec<Flag>>,
    pub discrepancies: Vec<Discrepancy>,
    pub risk: ComparisonRisk,
    pub recommendation: String,
}

impl BureauComparison {
    pub fn bureaus(&self) -> impl Iterator<Item = Bureau> + '_ {
        self.accounts.keys().copied()
    }

    pub fn flag_count(&self) -> usize {
        self.flags.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BureauReconciler {
    engine: RuleEngine,
}

impl BureauReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(
        &self,
        experian: &[FieldSet],
        equifax: &[FieldSet],
        transunion: &[FieldSet],
        today: NaiveDate,
    ) -> Vec<BureauComparison> {
        let groups = group_accounts([
            (Bureau::Experian, experian),
            (Bureau::Equifax, equifax),
            (Bureau::TransUnion, transunion),
        ]);

        let mut comparisons: Vec<BureauComparison> = groups
            .into_iter()
            .map(|((key, _), accounts)| self.compare_group(key, accounts, today))
            .collect();

        comparisons.sort_by(|a, b| {
            a.risk
                .cmp(&b.risk)
                .then_with(|| a.creditor_key.cmp(&b.creditor_key))
        });
        comparisons
    }

    fn compare_group(
        &self,
        creditor_key: String,
        accounts: BTreeMap<Bureau, FieldSet>,
        today: NaiveDate,
    ) -> BureauComparison {
        let flags: BTreeMap<Bureau, Vec<Flag>> = accounts
            .iter()
            .map(|(bureau, fields)| (*bureau, self.engine.evaluate(fields, today)))
            .collect();
        let discrepancies = discrepancy::find_discrepancies(&accounts);
        let risk = comparison_risk(&discrepancies, &flags);
        let creditor_name = accounts
            .values()
            .next()
            .map(|fields| fields.creditor_label().to_string())
            .unwrap_or_default();

        debug!(
            creditor = %creditor_key,
            bureaus = accounts.len(),
            discrepancies = discrepancies.len(),
            ?risk,
            "bureau comparison built"
        );

        BureauComparison {
            recommendation: recommendation(risk, &discrepancies).to_string(),
            creditor_key,
            creditor_name,
            accounts,
            flags,
            discrepancies,
            risk,
        }
    }
}

pub fn compare(
    experian: &[FieldSet],
    equifax: &[FieldSet],
    transunion: &[FieldSet],
    today: NaiveDate,
) -> Vec<BureauComparison> {
    BureauReconciler::new().compare(experian, equifax, transunion, today)
}

/// Pair the n-th account with a given creditor key from each bureau.
fn group_accounts(
    bureaus: [(Bureau, &[FieldSet]); 3],
) -> BTreeMap<(String, usize), BTreeMap<Bureau, FieldSet>> {
    let mut groups: BTreeMap<(String, usize), BTreeMap<Bureau, FieldSet>> = BTreeMap::new();
    for (bureau, accounts) in bureaus {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for fields in accounts {
            let key = creditor_key(fields.creditor_label());
            let occurrence = seen.entry(key.clone()).or_insert(0);
            groups
                .entry((key, *occurrence))
                .or_default()
                .insert(bureau, fields.clone());
            *occurrence += 1;
        }
    }
    groups
}

fn comparison_risk(
    discrepancies: &[Discrepancy],
    flags: &BTreeMap<Bureau, Vec<Flag>>,
) -> ComparisonRisk {
    let critical = discrepancies
        .iter()
        .any(|item| item.severity == DiscrepancySeverity::Critical);
    let significant = discrepancies
        .iter()
        .filter(|item| item.severity == DiscrepancySeverity::Significant)
        .count();
    let all_flags = || flags.values().flatten();

    if critical || significant >= 2 || all_flags().any(|flag| flag.severity.is_severe()) {
        ComparisonRisk::High
    } else if significant >= 1 || all_flags().any(|flag| flag.severity == Severity::Medium) {
        ComparisonRisk::Medium
    } else {
        ComparisonRisk::Low
    }
}

fn recommendation(risk: ComparisonRisk, discrepancies: &[Discrepancy]) -> &'static str {
    match risk {
        ComparisonRisk::High if discrepancies.is_empty() => {
            "The bureaus agree, but the account carries serious reporting violations. Dispute each flagged item with every bureau."
        }
        ComparisonRisk::High => {
            "File disputes with every bureau listing each inconsistent field. Inconsistent reporting of the same account shows at least one furnisher report is inaccurate."
        }
        ComparisonRisk::Medium => {
            "Dispute the inconsistent fields with the bureaus whose data differs from your records."
        }
        ComparisonRisk::Low => "The bureaus report this account consistently; no cross-bureau dispute is needed.",
    }
}
