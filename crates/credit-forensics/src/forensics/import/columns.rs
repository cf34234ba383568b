use std::collections::HashMap;
use std::sync::OnceLock;

use crate::forensics::fields::FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TradelineColumn {
    Creditor,
    Furnisher,
    AccountType,
    AccountStatus,
    CurrentBalance,
    OriginalAmount,
    DateOpened,
    Dofd,
    ChargeOffDate,
    LastPaymentDate,
    DateLastReported,
    EstimatedRemovalDate,
    PaymentHistory,
    Bureau,
    State,
}

impl TradelineColumn {
    pub(crate) fn assign(self, fields: &mut FieldSet, value: String) {
        let slot = match self {
            Self::Creditor => &mut fields.creditor_name,
            Self::Furnisher => &mut fields.furnisher_name,
            Self::AccountType => &mut fields.account_type,
            Self::AccountStatus => &mut fields.account_status,
            Self::CurrentBalance => &mut fields.current_balance,
            Self::OriginalAmount => &mut fields.original_amount,
            Self::DateOpened => &mut fields.date_opened,
            Self::Dofd => &mut fields.dofd,
            Self::ChargeOffDate => &mut fields.charge_off_date,
            Self::LastPaymentDate => &mut fields.last_payment_date,
            Self::DateLastReported => &mut fields.date_last_reported,
            Self::EstimatedRemovalDate => &mut fields.estimated_removal_date,
            Self::PaymentHistory => &mut fields.payment_history,
            Self::Bureau => &mut fields.bureau,
            Self::State => &mut fields.state_code,
        };
        *slot = Some(value);
    }
}

static HEADER_MAP: OnceLock<HashMap<String, TradelineColumn>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<TradelineColumn> {
    header_map().get(&normalize_header(header)).copied()
}

pub(crate) fn normalize_header(header: &str) -> String {
    header
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

fn header_map() -> &'static HashMap<String, TradelineColumn> {
    HEADER_MAP.get_or_init(|| {
        use TradelineColumn::*;

        const HEADERS: &[(&str, TradelineColumn)] = &[
            ("Creditor", Creditor),
            ("Creditor Name", Creditor),
            ("Original Creditor", Creditor),
            ("Furnisher", Furnisher),
            ("Furnisher Name", Furnisher),
            ("Collector", Furnisher),
            ("Account Type", AccountType),
            ("Type", AccountType),
            ("Account Status", AccountStatus),
            ("Status", AccountStatus),
            ("Current Balance", CurrentBalance),
            ("Balance", CurrentBalance),
            ("Original Amount", OriginalAmount),
            ("Original Balance", OriginalAmount),
            ("High Credit", OriginalAmount),
            ("Date Opened", DateOpened),
            ("Opened", DateOpened),
            ("DOFD", Dofd),
            ("Date of First Delinquency", Dofd),
            ("First Delinquency", Dofd),
            ("Charge-Off Date", ChargeOffDate),
            ("Charged Off", ChargeOffDate),
            ("Last Payment Date", LastPaymentDate),
            ("Date of Last Payment", LastPaymentDate),
            ("Last Payment", LastPaymentDate),
            ("Date Last Reported", DateLastReported),
            ("Last Reported", DateLastReported),
            ("Date Reported", DateLastReported),
            ("Estimated Removal Date", EstimatedRemovalDate),
            ("Removal Date", EstimatedRemovalDate),
            ("Payment History", PaymentHistory),
            ("Bureau", Bureau),
            ("Credit Bureau", Bureau),
            ("State", State),
            ("State Code", State),
        ];

        HEADERS
            .iter()
            .map(|(header, column)| (normalize_header(header), *column))
            .collect()
    })
}
