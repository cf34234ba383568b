//! Models how a bureau's dispute pipeline is likely to respond.
//!
//! The path is a fixed three-stage sequence: automated verification when
//! technical defects exist, escalation to manual review for high-risk files and
//! a terminal deletion decision that is always present.

use serde::{Deserialize, Serialize};

use crate::forensics::flags::Flag;
use crate::forensics::risk::RiskProfile;

const BASE_COMPLIANCE_COST: f64 = 25.0;
const COST_PER_TECHNICAL_FLAG: f64 = 12.5;
const MANUAL_REVIEW_COST: f64 = 180.0;
const MANUAL_REVIEW_SCORE: u32 = 70;
const AUTOMATED_VERIFY_PROBABILITY: u8 = 85;
const MANUAL_REVIEW_PROBABILITY: u8 = 40;
const MAX_DELETE_PROBABILITY: f64 = 95.0;
const SETTLEMENT_PER_RISK_POINT: f64 = 75.0;
const TECHNICAL_FAULT_MIN_FLAGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Delete,
    Verify,
    Ignore,
    HumanReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeTactic {
    TechnicalFault,
    LegalRisk,
}

impl DisputeTactic {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TechnicalFault => "technical fault",
            Self::LegalRisk => "legal risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNode {
    pub id: String,
    pub label: String,
    pub probability: u8,
    pub outcome: DecisionOutcome,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_tactic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub path: Vec<DecisionNode>,
    pub estimated_compliance_cost: f64,
    pub settlement_threshold: f64,
    pub dominant_tactic: DisputeTactic,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdversarialSimulator;

impl AdversarialSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn simulate(&self, flags: &[Flag], risk: &RiskProfile) -> SimulationResult {
        let technical = flags.iter().filter(|flag| flag.is_technical()).count();
        let score = risk.score();
        let mut cost = BASE_COMPLIANCE_COST;
        let mut path = Vec::with_capacity(3);

        if technical > 0 {
            cost += COST_PER_TECHNICAL_FLAG * technical as f64;
            path.push(DecisionNode {
                id: "automated_verification".to_string(),
                label: "Automated e-OSCAR verification".to_string(),
                probability: AUTOMATED_VERIFY_PROBABILITY,
                outcome: DecisionOutcome::Verify,
                reasoning: format!(
                    "The dispute is first matched against the furnisher's data by an automated system, which usually confirms the record as reported. {technical} technical defect(s) add handling cost to every automated pass."
                ),
                counter_tactic: Some(
                    "Cite the specific date or status contradiction so a template verification cannot answer it.".to_string(),
                ),
            });
        }

        if score > MANUAL_REVIEW_SCORE {
            cost += MANUAL_REVIEW_COST;
            path.push(DecisionNode {
                id: "manual_review".to_string(),
                label: "Escalation to manual review".to_string(),
                probability: MANUAL_REVIEW_PROBABILITY,
                outcome: DecisionOutcome::HumanReview,
                reasoning: format!(
                    "A risk score of {score} exceeds the level at which disputes are routed to a human analyst, adding ${MANUAL_REVIEW_COST:.2} in handling cost."
                ),
                counter_tactic: Some(
                    "Request the method of verification and the name of the person who verified the account.".to_string(),
                ),
            });
        }

        let delete_probability = (f64::from(score) / 1.5 + technical as f64 * 10.0)
            .min(MAX_DELETE_PROBABILITY)
            .round() as u8;
        path.push(DecisionNode {
            id: "deletion_decision".to_string(),
            label: "Deletion versus continued reporting".to_string(),
            probability: delete_probability,
            outcome: DecisionOutcome::Delete,
            reasoning: format!(
                "Defending this tradeline costs an estimated ${cost:.2} per dispute cycle; deleting it is cheaper than continuing to verify inaccurate data."
            ),
            counter_tactic: None,
        });

        SimulationResult {
            path,
            estimated_compliance_cost: cost,
            settlement_threshold: f64::from(score) * SETTLEMENT_PER_RISK_POINT,
            dominant_tactic: if technical >= TECHNICAL_FAULT_MIN_FLAGS {
                DisputeTactic::TechnicalFault
            } else {
                DisputeTactic::LegalRisk
            },
        }
    }
}

pub fn simulate(flags: &[Flag], risk: &RiskProfile) -> SimulationResult {
    AdversarialSimulator::new().simulate(flags, risk)
}
