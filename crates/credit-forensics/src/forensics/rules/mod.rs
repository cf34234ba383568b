//! Independent predicate rules over a [`FieldSet`].
//!
//! Rules never read each other's output, so the engine can run them in any
//! order. Missing or malformed inputs simply keep a rule from firing.

mod balance;
pub mod catalogue;
mod reporting;
mod statutory;
mod timeline;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::fields::FieldSet;
use super::flags::{EvidenceValue, Flag, RuleId};

pub use catalogue::{catalogue, definition, RuleDefinition};
pub use reporting::LEAD_HISTORY_TOKENS;

/// Inputs visible to every rule for a single evaluation.
pub(crate) struct RuleContext<'a> {
    pub(crate) fields: &'a FieldSet,
    pub(crate) today: NaiveDate,
}

type RuleFn = fn(&RuleContext<'_>) -> Vec<Flag>;

const RULES: &[RuleFn] = &[
    timeline::dofd_before_opened,
    timeline::excessive_reporting_span,
    timeline::dofd_after_charge_off,
    timeline::future_dates,
    timeline::reporting_limit_exceeded,
    balance::balance_inflation,
    balance::paid_with_balance,
    balance::transferred_with_balance,
    reporting::medical_below_threshold,
    reporting::missing_dofd,
    reporting::status_history_conflict,
    statutory::interest_cap_exceeded,
    statutory::statute_expired,
];

/// Stateless evaluator applying the full rule catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, fields: &FieldSet, today: NaiveDate) -> Vec<Flag> {
        let context = RuleContext { fields, today };
        let flags: Vec<Flag> = RULES.iter().flat_map(|rule| rule(&context)).collect();

        for flag in &flags {
            debug!(rule = %flag.rule_id, severity = flag.severity.label(), "rule fired");
        }

        flags
    }
}

/// Convenience wrapper around [`RuleEngine::evaluate`].
pub fn evaluate(fields: &FieldSet, today: NaiveDate) -> Vec<Flag> {
    RuleEngine::new().evaluate(fields, today)
}

/// Assembles a flag from its catalogue entry plus the triggering values.
pub(crate) struct FlagBuilder {
    rule: RuleId,
    explanation: String,
    field_values: BTreeMap<String, EvidenceValue>,
}

impl FlagBuilder {
    pub(crate) fn new(rule: RuleId, explanation: String) -> Self {
        Self {
            rule,
            explanation,
            field_values: BTreeMap::new(),
        }
    }

    pub(crate) fn value(mut self, key: &str, value: impl Into<EvidenceValue>) -> Self {
        self.field_values.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn build(self) -> Flag {
        let definition = definition(self.rule);
        Flag {
            rule_id: self.rule,
            rule_name: definition.name.to_string(),
            severity: definition.severity,
            explanation: self.explanation,
            why_it_matters: definition.why_it_matters.to_string(),
            suggested_evidence: definition
                .suggested_evidence
                .iter()
                .map(|item| item.to_string())
                .collect(),
            field_values: self.field_values,
            legal_citations: definition
                .legal_citations
                .iter()
                .map(|item| item.to_string())
                .collect(),
            category: definition.category,
            confidence: definition.confidence,
            success_probability: definition.success_probability,
        }
    }
}
