//! Static per-state legal parameters.
//!
//! The table is built once on first access and is read-only afterwards, so
//! lookups need no locking.

mod table;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub use table::DEFAULT_PROFILE;

/// Instrument the statute-of-limitations clock is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtInstrument {
    #[default]
    WrittenContract,
    OralContract,
    PromissoryNote,
    OpenAccount,
}

impl DebtInstrument {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "written" | "written_contract" | "written contract" => Some(Self::WrittenContract),
            "oral" | "oral_contract" | "oral contract" => Some(Self::OralContract),
            "promissory" | "promissory_note" | "promissory note" => Some(Self::PromissoryNote),
            "open" | "open_account" | "open account" | "revolving" => Some(Self::OpenAccount),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WrittenContract => "written contract",
            Self::OralContract => "oral contract",
            Self::PromissoryNote => "promissory note",
            Self::OpenAccount => "open account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuteOfLimitations {
    pub written_contract: u32,
    pub oral_contract: u32,
    pub promissory_note: u32,
    pub open_account: u32,
}

impl StatuteOfLimitations {
    pub const fn years_for(&self, instrument: DebtInstrument) -> u32 {
        match instrument {
            DebtInstrument::WrittenContract => self.written_contract,
            DebtInstrument::OralContract => self.oral_contract,
            DebtInstrument::PromissoryNote => self.promissory_note,
            DebtInstrument::OpenAccount => self.open_account,
        }
    }
}

/// Annual interest ceilings, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestCaps {
    pub judgment: f64,
    pub medical: f64,
    pub consumer: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerProtections {
    /// A state collection-practices act beyond the federal FDCPA.
    pub state_collection_act: bool,
    /// The state act also reaches original creditors.
    pub covers_original_creditors: bool,
    pub collector_licensing: bool,
    pub medical_debt_protections: bool,
    /// Collectors must disclose that a debt is past the statute of limitations.
    pub time_barred_disclosure: bool,
    /// A partial payment restarts the limitations clock.
    pub payment_revives_sol: bool,
}

impl ConsumerProtections {
    pub const NONE: Self = Self {
        state_collection_act: false,
        covers_original_creditors: false,
        collector_licensing: false,
        medical_debt_protections: false,
        time_barred_disclosure: false,
        payment_revives_sol: true,
    };

    pub const fn enhanced_count(&self) -> usize {
        self.state_collection_act as usize
            + self.covers_original_creditors as usize
            + self.collector_licensing as usize
            + self.medical_debt_protections as usize
            + self.time_barred_disclosure as usize
            + !self.payment_revives_sol as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegulatoryBody {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionProfile {
    pub state_code: &'static str,
    pub state_name: &'static str,
    pub statute_of_limitations: StatuteOfLimitations,
    pub interest_caps: InterestCaps,
    pub protections: ConsumerProtections,
    pub key_statutes: &'static [&'static str],
    pub special_notes: &'static [&'static str],
    pub regulator: RegulatoryBody,
}

impl JurisdictionProfile {
    pub const fn sol_years(&self, instrument: DebtInstrument) -> u32 {
        self.statute_of_limitations.years_for(instrument)
    }

    pub fn is_default(&self) -> bool {
        self.state_code == DEFAULT_PROFILE.state_code
    }

    /// Cap applied to the implied growth rate of a tradeline balance.
    pub const fn growth_cap(&self, medical: bool) -> f64 {
        if medical {
            self.interest_caps.medical
        } else {
            self.interest_caps.consumer
        }
    }
}

static PROFILE_INDEX: OnceLock<HashMap<&'static str, &'static JurisdictionProfile>> =
    OnceLock::new();

fn profile_index() -> &'static HashMap<&'static str, &'static JurisdictionProfile> {
    PROFILE_INDEX.get_or_init(|| {
        table::PROFILES
            .iter()
            .map(|profile| (profile.state_code, profile))
            .collect()
    })
}

/// Case-insensitive lookup falling back to [`DEFAULT_PROFILE`].
pub fn lookup(state_code: &str) -> &'static JurisdictionProfile {
    find(state_code).unwrap_or(&DEFAULT_PROFILE)
}

/// Lookup without the fallback, for callers that must know the code is real.
pub fn find(state_code: &str) -> Option<&'static JurisdictionProfile> {
    let normalized = state_code.trim().to_ascii_uppercase();
    profile_index().get(normalized.as_str()).copied()
}

pub fn all_profiles() -> &'static [JurisdictionProfile] {
    table::PROFILES
}
