use super::{
    ConsumerProtections, InterestCaps, JurisdictionProfile, RegulatoryBody, StatuteOfLimitations,
};

const STATE_ATTORNEY_GENERAL: RegulatoryBody = RegulatoryBody {
    name: "State Attorney General (consumer protection division)",
    url: "https://www.naag.org/find-my-ag/",
};

const FEDERAL_STATUTES: &[&str] = &[
    "15 U.S.C. § 1681s-2 (FCRA furnisher duties)",
    "15 U.S.C. § 1692 et seq. (FDCPA)",
];

pub const DEFAULT_PROFILE: JurisdictionProfile = JurisdictionProfile {
    state_code: "DEFAULT",
    state_name: "Default (unrecognized jurisdiction)",
    statute_of_limitations: StatuteOfLimitations {
        written_contract: 5,
        oral_contract: 5,
        promissory_note: 5,
        open_account: 5,
    },
    interest_caps: InterestCaps {
        judgment: 8.0,
        medical: 6.0,
        consumer: 10.0,
    },
    protections: ConsumerProtections::NONE,
    key_statutes: FEDERAL_STATUTES,
    special_notes: &["Federal protections only; confirm the consumer's state of residence."],
    regulator: RegulatoryBody {
        name: "Consumer Financial Protection Bureau",
        url: "https://www.consumerfinance.gov/complaint/",
    },
};

/// `sol` is written / oral / promissory / open account; `caps` is judgment / medical / consumer.
const fn state(
    state_code: &'static str,
    state_name: &'static str,
    sol: [u32; 4],
    caps: [f64; 3],
) -> JurisdictionProfile {
    JurisdictionProfile {
        state_code,
        state_name,
        statute_of_limitations: StatuteOfLimitations {
            written_contract: sol[0],
            oral_contract: sol[1],
            promissory_note: sol[2],
            open_account: sol[3],
        },
        interest_caps: InterestCaps {
            judgment: caps[0],
            medical: caps[1],
            consumer: caps[2],
        },
        protections: ConsumerProtections::NONE,
        key_statutes: FEDERAL_STATUTES,
        special_notes: &[],
        regulator: STATE_ATTORNEY_GENERAL,
    }
}

pub(super) static PROFILES: &[JurisdictionProfile] = &[
    state("AL", "Alabama", [6, 6, 6, 3], [7.5, 6.0, 8.0]),
    state("AK", "Alaska", [3, 3, 3, 3], [10.5, 6.0, 10.5]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        ..state("AZ", "Arizona", [6, 3, 6, 3], [10.0, 6.0, 10.0])
    },
    state("AR", "Arkansas", [5, 3, 5, 3], [9.0, 6.0, 17.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            medical_debt_protections: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
        },
        key_statutes: &[
            "Cal. Civ. Code § 1788 et seq. (Rosenthal Fair Debt Collection Practices Act)",
            "Cal. Civ. Code § 1788.50 et seq. (Fair Debt Buying Practices Act)",
            "Cal. Civ. Code § 1785.25 (furnisher accuracy)",
            "Cal. Code Civ. Proc. § 337 (written contracts)",
            "Cal. Fin. Code § 100000 et seq. (Debt Collection Licensing Act)",
        ],
        special_notes: &[
            "Rosenthal Act reaches original creditors collecting their own debts.",
            "Debt buyers may not sue or threaten suit on time-barred debt.",
            "Medical debt may not be furnished to consumer reporting agencies.",
        ],
        regulator: RegulatoryBody {
            name: "California Department of Financial Protection and Innovation",
            url: "https://dfpi.ca.gov/",
        },
        ..state("CA", "California", [4, 2, 4, 4], [10.0, 10.0, 10.0])
    },
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            medical_debt_protections: true,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "Colo. Rev. Stat. § 5-16-101 et seq. (Colorado Fair Debt Collection Practices Act)",
            "Colo. Rev. Stat. § 5-18-109 (medical debt reporting)",
            "Colo. Rev. Stat. § 13-80-103.5",
        ],
        special_notes: &["Medical debt may not appear on Colorado consumer reports."],
        regulator: RegulatoryBody {
            name: "Colorado Attorney General, Consumer Credit Unit",
            url: "https://coag.gov/office-sections/consumer-protection/consumer-credit-unit/",
        },
        ..state("CO", "Colorado", [6, 6, 6, 6], [8.0, 8.0, 8.0])
    },
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        ..state("CT", "Connecticut", [6, 3, 6, 6], [10.0, 6.0, 12.0])
    },
    state("DE", "Delaware", [3, 3, 6, 3], [11.5, 6.0, 11.5]),
    state("DC", "District of Columbia", [3, 3, 3, 3], [6.0, 6.0, 6.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "Fla. Stat. § 559.55 et seq. (Florida Consumer Collection Practices Act)",
            "Fla. Stat. § 95.11 (limitations periods)",
        ],
        special_notes: &["FCCPA applies to any person collecting a consumer debt."],
        regulator: RegulatoryBody {
            name: "Florida Office of Financial Regulation",
            url: "https://flofr.gov/",
        },
        ..state("FL", "Florida", [5, 4, 5, 4], [9.09, 6.0, 18.0])
    },
    state("GA", "Georgia", [6, 4, 6, 4], [7.0, 7.0, 16.0]),
    state("HI", "Hawaii", [6, 6, 6, 6], [10.0, 6.0, 12.0]),
    state("ID", "Idaho", [5, 4, 5, 4], [12.0, 6.0, 12.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "205 ILCS 740 (Collection Agency Act)",
            "735 ILCS 5/13-206 (written contracts)",
            "815 ILCS 505 (Consumer Fraud Act)",
        ],
        special_notes: &[],
        regulator: RegulatoryBody {
            name: "Illinois Department of Financial and Professional Regulation",
            url: "https://idfpr.illinois.gov/",
        },
        ..state("IL", "Illinois", [10, 5, 10, 5], [9.0, 5.0, 9.0])
    },
    state("IN", "Indiana", [10, 6, 10, 6], [8.0, 6.0, 10.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            ..ConsumerProtections::NONE
        },
        ..state("IA", "Iowa", [10, 5, 5, 5], [10.0, 5.0, 10.0])
    },
    state("KS", "Kansas", [5, 3, 5, 3], [10.0, 6.0, 15.0]),
    state("KY", "Kentucky", [10, 5, 15, 5], [6.0, 6.0, 8.0]),
    state("LA", "Louisiana", [10, 10, 5, 3], [6.0, 6.0, 12.0]),
    state("ME", "Maine", [6, 6, 6, 6], [8.0, 6.0, 8.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "Md. Code, Com. Law § 14-201 et seq. (Maryland Consumer Debt Collection Act)",
            "Md. Code, Cts. & Jud. Proc. § 5-1202 (time-barred debt)",
        ],
        special_notes: &["Payment on time-barred consumer debt does not revive the limitations period."],
        regulator: RegulatoryBody {
            name: "Maryland Office of Financial Regulation",
            url: "https://labor.maryland.gov/finance/",
        },
        ..state("MD", "Maryland", [3, 3, 6, 3], [10.0, 6.0, 6.0])
    },
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "940 CMR 7.00 (debt collection regulations)",
            "Mass. Gen. Laws ch. 93A (Consumer Protection Act)",
            "Mass. Gen. Laws ch. 93, § 24 et seq. (collector licensing)",
        ],
        special_notes: &["Chapter 93A demand letter required 30 days before suit."],
        regulator: RegulatoryBody {
            name: "Massachusetts Division of Banks",
            url: "https://www.mass.gov/orgs/division-of-banks",
        },
        ..state("MA", "Massachusetts", [6, 6, 6, 6], [12.0, 6.0, 6.0])
    },
    state("MI", "Michigan", [6, 6, 6, 6], [5.0, 5.0, 7.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            collector_licensing: true,
            medical_debt_protections: true,
            ..ConsumerProtections::NONE
        },
        special_notes: &["Medical debt reporting restricted under the Debt Fairness Act."],
        ..state("MN", "Minnesota", [6, 6, 6, 6], [10.0, 6.0, 8.0])
    },
    state("MS", "Mississippi", [3, 3, 3, 3], [8.0, 8.0, 10.0]),
    state("MO", "Missouri", [10, 5, 10, 5], [9.0, 9.0, 9.0]),
    state("MT", "Montana", [8, 5, 8, 5], [10.0, 6.0, 10.0]),
    state("NE", "Nebraska", [5, 4, 5, 4], [6.0, 6.0, 6.0]),
    state("NV", "Nevada", [6, 4, 3, 4], [10.0, 6.0, 10.0]),
    state("NH", "New Hampshire", [3, 3, 6, 3], [10.0, 6.0, 10.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        ..state("NJ", "New Jersey", [6, 6, 6, 6], [6.0, 6.0, 6.0])
    },
    state("NM", "New Mexico", [6, 4, 6, 4], [8.75, 6.0, 15.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            medical_debt_protections: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "N.Y. Gen. Bus. Law § 600 et seq. (debt collection procedures)",
            "N.Y. C.P.L.R. § 214-i (Consumer Credit Fairness Act)",
            "23 NYCRR 1 (DFS debt collection rule)",
            "N.Y. C.P.L.R. § 5004 (medical debt judgment interest)",
        ],
        special_notes: &[
            "Consumer credit transactions carry a three-year limitations period.",
            "Judgment interest on medical debt is capped at 2%.",
        ],
        regulator: RegulatoryBody {
            name: "New York State Department of Financial Services",
            url: "https://www.dfs.ny.gov/",
        },
        ..state("NY", "New York", [6, 6, 6, 6], [9.0, 2.0, 16.0])
    },
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "N.C. Gen. Stat. § 75-50 et seq. (prohibited collection practices)",
            "N.C. Gen. Stat. § 58-70-115 (debt buyer obligations)",
        ],
        special_notes: &["Debt buyers must attach proof of ownership to any complaint."],
        ..state("NC", "North Carolina", [3, 3, 5, 3], [8.0, 8.0, 8.0])
    },
    state("ND", "North Dakota", [6, 6, 6, 6], [6.0, 6.0, 6.0]),
    state("OH", "Ohio", [8, 6, 8, 6], [5.0, 5.0, 8.0]),
    state("OK", "Oklahoma", [5, 3, 5, 3], [6.0, 6.0, 6.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            ..ConsumerProtections::NONE
        },
        ..state("OR", "Oregon", [6, 6, 6, 6], [9.0, 6.0, 9.0])
    },
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "73 P.S. § 2270.1 et seq. (Fair Credit Extension Uniformity Act)",
            "42 Pa.C.S. § 5525 (four-year contract limitations)",
        ],
        ..state("PA", "Pennsylvania", [4, 4, 4, 4], [6.0, 6.0, 6.0])
    },
    state("RI", "Rhode Island", [10, 10, 10, 10], [12.0, 12.0, 12.0]),
    state("SC", "South Carolina", [3, 3, 3, 3], [8.75, 6.0, 8.75]),
    state("SD", "South Dakota", [6, 6, 6, 6], [10.0, 10.0, 15.0]),
    state("TN", "Tennessee", [6, 6, 6, 6], [7.0, 6.0, 10.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            time_barred_disclosure: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "Tex. Fin. Code ch. 392 (Texas Debt Collection Act)",
            "Tex. Fin. Code § 392.307 (time-barred debt)",
            "Tex. Civ. Prac. & Rem. Code § 16.004 (four-year limitations)",
        ],
        special_notes: &["Payment on time-barred debt does not revive the limitations period."],
        regulator: RegulatoryBody {
            name: "Texas Office of Consumer Credit Commissioner",
            url: "https://occc.texas.gov/",
        },
        ..state("TX", "Texas", [4, 4, 4, 4], [5.0, 5.0, 6.0])
    },
    state("UT", "Utah", [6, 4, 6, 4], [10.0, 6.0, 10.0]),
    state("VT", "Vermont", [6, 6, 5, 6], [12.0, 12.0, 12.0]),
    state("VA", "Virginia", [5, 3, 6, 3], [6.0, 6.0, 6.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            collector_licensing: true,
            medical_debt_protections: true,
            ..ConsumerProtections::NONE
        },
        key_statutes: &[
            "RCW 19.16 (Collection Agency Act)",
            "RCW 4.56.110 (judgment interest, 9% on medical debt)",
            "RCW 70.54.470 (medical debt collection)",
        ],
        regulator: RegulatoryBody {
            name: "Washington Department of Financial Institutions",
            url: "https://dfi.wa.gov/",
        },
        ..state("WA", "Washington", [6, 3, 6, 3], [12.0, 9.0, 12.0])
    },
    state("WV", "West Virginia", [10, 5, 6, 5], [7.0, 6.0, 8.0]),
    JurisdictionProfile {
        protections: ConsumerProtections {
            state_collection_act: true,
            covers_original_creditors: true,
            collector_licensing: true,
            payment_revives_sol: false,
            ..ConsumerProtections::NONE
        },
        key_statutes: &["Wis. Stat. § 427.101 et seq. (Wisconsin Consumer Act)"],
        special_notes: &["Expiry of the limitations period extinguishes the debt itself."],
        ..state("WI", "Wisconsin", [6, 6, 10, 6], [5.0, 5.0, 5.0])
    },
    state("WY", "Wyoming", [10, 8, 10, 8], [10.0, 7.0, 10.0]),
];
