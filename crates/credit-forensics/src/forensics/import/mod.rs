//! Tradeline CSV import.
//!
//! Reads fields that were already extracted from a report (one row per
//! account, headers such as `Creditor`, `Bureau`, `DOFD`) into [`FieldSet`]s.

mod columns;

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use super::fields::FieldSet;
use super::reconcile::{Bureau, BureauComparison, BureauReconciler};

use columns::{column_for_header, TradelineColumn};

#[derive(Debug, Error)]
pub enum TradelineImportError {
    #[error("failed to read tradeline export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tradeline CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("tradeline CSV has no recognised columns")]
    NoRecognizedColumns,
}

pub struct TradelineImporter;

impl TradelineImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<FieldSet>, TradelineImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<FieldSet>, TradelineImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<Option<TradelineColumn>> = csv_reader
            .headers()?
            .iter()
            .map(|header| {
                let column = column_for_header(header);
                if column.is_none() {
                    debug!(header, "ignoring unrecognised tradeline column");
                }
                column
            })
            .collect();
        if columns.iter().all(Option::is_none) {
            return Err(TradelineImportError::NoRecognizedColumns);
        }

        let mut accounts = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut fields = FieldSet::default();
            for (column, value) in columns.iter().zip(record.iter()) {
                if let Some(column) = column {
                    if !value.is_empty() {
                        column.assign(&mut fields, value.to_string());
                    }
                }
            }

            if fields == FieldSet::default() {
                warn!(row = index + 2, "skipping tradeline row with no values");
                continue;
            }
            accounts.push(fields);
        }

        debug!(accounts = accounts.len(), "tradeline import complete");
        Ok(accounts)
    }
}

/// Accounts split by the bureau that reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BureauAccounts {
    pub experian: Vec<FieldSet>,
    pub equifax: Vec<FieldSet>,
    pub transunion: Vec<FieldSet>,
    /// Rows whose bureau column was blank or unrecognised.
    pub unassigned: Vec<FieldSet>,
}

impl BureauAccounts {
    pub fn partition(accounts: impl IntoIterator<Item = FieldSet>) -> Self {
        let mut partitioned = Self::default();
        for fields in accounts {
            match fields.bureau.as_deref().and_then(Bureau::parse) {
                Some(Bureau::Experian) => partitioned.experian.push(fields),
                Some(Bureau::Equifax) => partitioned.equifax.push(fields),
                Some(Bureau::TransUnion) => partitioned.transunion.push(fields),
                None => partitioned.unassigned.push(fields),
            }
        }
        if !partitioned.unassigned.is_empty() {
            warn!(
                count = partitioned.unassigned.len(),
                "tradelines without a recognised bureau were left out of reconciliation"
            );
        }
        partitioned
    }

    pub fn for_bureau(&self, bureau: Bureau) -> &[FieldSet] {
        match bureau {
            Bureau::Experian => &self.experian,
            Bureau::Equifax => &self.equifax,
            Bureau::TransUnion => &self.transunion,
        }
    }

    pub fn assigned_len(&self) -> usize {
        self.experian.len() + self.equifax.len() + self.transunion.len()
    }

    pub fn reconcile(&self, today: NaiveDate) -> Vec<BureauComparison> {
        BureauReconciler::new().compare(&self.experian, &self.equifax, &self.transunion, today)
    }
}
