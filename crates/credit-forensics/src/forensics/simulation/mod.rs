//! Downstream projections built from a flag list and its risk profile.

pub mod adversarial;
pub mod financing;
pub mod score_impact;

pub use adversarial::{
    AdversarialSimulator, DecisionNode, DecisionOutcome, DisputeTactic, SimulationResult,
};
pub use financing::{FinancialBenefit, LoanProduct, RateQuote};
pub use score_impact::{
    CategoryImpact, CreditFactor, ProjectedScores, RemovalConfidence, RemovalSimulation,
    ScoreImpactSimulator, ScoreSimulationResult, TimelinePoint,
};
