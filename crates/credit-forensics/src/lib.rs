//! Forensic analysis of consumer credit report tradelines.
//!
//! The [`forensics`] module holds the engine: the rule catalogue, pattern
//! detection, risk scoring, jurisdiction data, deadline calculation,
//! cross-bureau reconciliation and the dispute simulators. Every engine entry
//! point takes the evaluation date explicitly so a single call sees one
//! consistent "today".

pub mod config;
pub mod error;
pub mod forensics;
pub mod telemetry;
