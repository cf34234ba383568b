use serde::Serialize;

use super::super::flags::{FlagCategory, RuleId, Severity};

/// Static metadata attached to every flag a rule emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub id: RuleId,
    pub name: &'static str,
    pub severity: Severity,
    pub category: FlagCategory,
    pub why_it_matters: &'static str,
    pub suggested_evidence: &'static [&'static str],
    pub legal_citations: &'static [&'static str],
    pub confidence: u8,
    pub success_probability: u8,
}

const FCRA_ACCURACY: &str = "15 U.S.C. § 1681e(b) (maximum possible accuracy)";
const FCRA_FURNISHER: &str = "15 U.S.C. § 1681s-2(a) (furnisher accuracy duties)";
const FCRA_OBSOLETE: &str = "15 U.S.C. § 1681c(a)(4) (seven-year reporting limit)";
const FCRA_DOFD: &str = "15 U.S.C. § 1681c(c)(1) (reporting period runs from delinquency)";
const FCRA_DOFD_DUTY: &str = "15 U.S.C. § 1681s-2(a)(5) (duty to report DOFD)";
const FDCPA_MISREPRESENTATION: &str = "15 U.S.C. § 1692e(2)(A) (false representation of debt)";
const FDCPA_UNFAIR: &str = "15 U.S.C. § 1692f(1) (unauthorized amounts)";
const REG_F_TIME_BARRED: &str = "12 C.F.R. § 1006.26(b) (suits on time-barred debt)";
const METRO2: &str = "CDIA Credit Reporting Resource Guide (Metro 2 format)";

const B1: RuleDefinition = RuleDefinition {
    id: RuleId::DofdBeforeOpened,
    name: "Delinquency Predates Account Opening",
    severity: Severity::High,
    category: FlagCategory::Timeline,
    why_it_matters: "An account cannot become delinquent before it exists. An impossible DOFD means the furnisher's date data is unreliable and the reporting clock may be wrong.",
    suggested_evidence: &[
        "Original account agreement showing the open date",
        "Earliest billing statement",
        "Credit reports from each bureau showing both dates",
    ],
    legal_citations: &[FCRA_ACCURACY, FCRA_FURNISHER, FCRA_DOFD],
    confidence: 95,
    success_probability: 85,
};

const B2: RuleDefinition = RuleDefinition {
    id: RuleId::ExcessiveReportingSpan,
    name: "Reporting Period Exceeds Seven Years",
    severity: Severity::High,
    category: FlagCategory::Timeline,
    why_it_matters: "Negative items must drop off seven years after the delinquency began (plus 180 days). A longer projected removal date indicates the DOFD was moved forward.",
    suggested_evidence: &[
        "Credit report showing the estimated removal date",
        "Payment records establishing the first missed payment",
        "Original creditor's charge-off notice",
    ],
    legal_citations: &[FCRA_OBSOLETE, FCRA_DOFD],
    confidence: 90,
    success_probability: 80,
};

const B3: RuleDefinition = RuleDefinition {
    id: RuleId::DofdAfterChargeOff,
    name: "Delinquency Date After Charge-Off",
    severity: Severity::High,
    category: FlagCategory::Timeline,
    why_it_matters: "A charge-off follows months of delinquency, so the DOFD must come first. A later DOFD extends the reporting window illegally.",
    suggested_evidence: &[
        "Charge-off notice from the original creditor",
        "Statements showing the last on-time payment",
    ],
    legal_citations: &[FCRA_DOFD, FCRA_FURNISHER, METRO2],
    confidence: 92,
    success_probability: 82,
};

const E1: RuleDefinition = RuleDefinition {
    id: RuleId::FutureDate,
    name: "Date Reported in the Future",
    severity: Severity::High,
    category: FlagCategory::Timeline,
    why_it_matters: "A date that has not happened yet is facially inaccurate and shows the furnisher's data was not verified before reporting.",
    suggested_evidence: &["Dated copy of the credit report showing the future date"],
    legal_citations: &[FCRA_ACCURACY, FCRA_FURNISHER],
    confidence: 98,
    success_probability: 90,
};

const K7: RuleDefinition = RuleDefinition {
    id: RuleId::ReportingLimitExceeded,
    name: "Obsolete Account Still Reporting",
    severity: Severity::High,
    category: FlagCategory::Timeline,
    why_it_matters: "Once seven years and 180 days have passed since the DOFD the account is obsolete and must not appear on the report at all.",
    suggested_evidence: &[
        "Credit report dated after the expected removal date",
        "Documentation of the original delinquency date",
    ],
    legal_citations: &[FCRA_OBSOLETE, FCRA_DOFD],
    confidence: 95,
    success_probability: 90,
};

const D1: RuleDefinition = RuleDefinition {
    id: RuleId::PaidWithBalance,
    name: "Paid Account Reporting a Balance",
    severity: Severity::High,
    category: FlagCategory::Balance,
    why_it_matters: "A paid or settled account must report a zero balance. A lingering balance inflates utilisation and misrepresents the debt as owed.",
    suggested_evidence: &[
        "Payoff or settlement letter",
        "Bank record of the final payment",
    ],
    legal_citations: &[FCRA_ACCURACY, FCRA_FURNISHER, FDCPA_MISREPRESENTATION],
    confidence: 90,
    success_probability: 85,
};

const D2: RuleDefinition = RuleDefinition {
    id: RuleId::TransferredWithBalance,
    name: "Transferred Account Reporting a Balance",
    severity: Severity::High,
    category: FlagCategory::Balance,
    why_it_matters: "After a sale or transfer the seller must report a zero balance. Reporting the balance twice makes one debt look like two.",
    suggested_evidence: &[
        "Notice of assignment or sale",
        "Collector's tradeline for the same debt",
    ],
    legal_citations: &[FCRA_ACCURACY, FCRA_FURNISHER, METRO2],
    confidence: 88,
    success_probability: 80,
};

const F1: RuleDefinition = RuleDefinition {
    id: RuleId::BalanceInflation,
    name: "Balance Inflated Beyond Original Amount",
    severity: Severity::Medium,
    category: FlagCategory::Balance,
    why_it_matters: "Growth of more than half the original amount usually means fees or interest were added that the agreement or state law does not allow.",
    suggested_evidence: &[
        "Original agreement showing the permitted interest and fees",
        "Itemised statement of the current balance",
    ],
    legal_citations: &[FDCPA_UNFAIR, FDCPA_MISREPRESENTATION],
    confidence: 75,
    success_probability: 65,
};

const H1: RuleDefinition = RuleDefinition {
    id: RuleId::MedicalBelowThreshold,
    name: "Medical Debt Below Reporting Threshold",
    severity: Severity::High,
    category: FlagCategory::Medical,
    why_it_matters: "The nationwide bureaus no longer report medical collections under $500. Its presence means the tradeline should be suppressed.",
    suggested_evidence: &[
        "Credit report showing the medical tradeline and balance",
        "Explanation of benefits or provider bill",
    ],
    legal_citations: &[FCRA_ACCURACY, "15 U.S.C. § 1681c(a)(6) (medical information)"],
    confidence: 90,
    success_probability: 88,
};

const M2: RuleDefinition = RuleDefinition {
    id: RuleId::MissingDofd,
    name: "Collection Missing Date of First Delinquency",
    severity: Severity::Medium,
    category: FlagCategory::MissingData,
    why_it_matters: "Furnishers of collection and charge-off accounts must report the DOFD. Without it the seven-year clock cannot be verified.",
    suggested_evidence: &["Credit report showing the blank DOFD field"],
    legal_citations: &[FCRA_DOFD_DUTY, METRO2],
    confidence: 80,
    success_probability: 70,
};

const C1: RuleDefinition = RuleDefinition {
    id: RuleId::StatusHistoryConflict,
    name: "Status Contradicts Payment History",
    severity: Severity::Medium,
    category: FlagCategory::Consistency,
    why_it_matters: "A current or paid status alongside recent late-payment markers means the tradeline is internally inconsistent; at least one of the two is wrong.",
    suggested_evidence: &[
        "Payment history grid from the credit report",
        "Bank statements proving on-time payments",
    ],
    legal_citations: &[FCRA_ACCURACY, FCRA_FURNISHER],
    confidence: 78,
    success_probability: 70,
};

const L1: RuleDefinition = RuleDefinition {
    id: RuleId::InterestCapExceeded,
    name: "Balance Growth Exceeds State Interest Cap",
    severity: Severity::High,
    category: FlagCategory::Jurisdiction,
    why_it_matters: "The implied annual growth of the balance is higher than the state allows, which points to unlawful interest or fees.",
    suggested_evidence: &[
        "Itemisation of interest and fees since charge-off",
        "Original agreement's stated rate",
    ],
    legal_citations: &[FDCPA_UNFAIR, "Applicable state usury and collection statutes"],
    confidence: 72,
    success_probability: 60,
};

const S1: RuleDefinition = RuleDefinition {
    id: RuleId::StatuteExpired,
    name: "Statute of Limitations Expired",
    severity: Severity::Medium,
    category: FlagCategory::Jurisdiction,
    why_it_matters: "The debt is time-barred. Collectors may not sue or threaten to sue, and in several states a payment will not revive it.",
    suggested_evidence: &[
        "Record of the last payment date",
        "Any collection letters threatening legal action",
    ],
    legal_citations: &[REG_F_TIME_BARRED, "15 U.S.C. § 1692e(5) (threats of action not intended or permitted)"],
    confidence: 85,
    success_probability: 75,
};

pub fn definition(rule: RuleId) -> &'static RuleDefinition {
    match rule {
        RuleId::DofdBeforeOpened => &B1,
        RuleId::ExcessiveReportingSpan => &B2,
        RuleId::DofdAfterChargeOff => &B3,
        RuleId::FutureDate => &E1,
        RuleId::ReportingLimitExceeded => &K7,
        RuleId::PaidWithBalance => &D1,
        RuleId::TransferredWithBalance => &D2,
        RuleId::BalanceInflation => &F1,
        RuleId::MedicalBelowThreshold => &H1,
        RuleId::MissingDofd => &M2,
        RuleId::StatusHistoryConflict => &C1,
        RuleId::InterestCapExceeded => &L1,
        RuleId::StatuteExpired => &S1,
    }
}

/// All rule definitions in catalogue order.
pub fn catalogue() -> Vec<&'static RuleDefinition> {
    RuleId::all().into_iter().map(definition).collect()
}
