use crate::forensics::dates::parse_date;
use crate::forensics::fields::{format_amount, parse_amount};

/// Trailing words that distinguish legal entities or collection desks but not creditors.
const CREDITOR_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "llc",
    "llp",
    "lp",
    "ltd",
    "limited",
    "corp",
    "corporation",
    "co",
    "company",
    "na",
    "fsb",
    "plc",
    "collections",
    "collection",
    "services",
    "service",
    "svcs",
    "recovery",
    "agency",
    "associates",
    "group",
];

pub const UNKNOWN_CREDITOR_KEY: &str = "unknown";

/// Grouping key for a creditor name: lowercase alphanumerics with trailing
/// corporate and collection suffixes removed.
pub fn creditor_key(name: &str) -> String {
    let mut words: Vec<String> = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return UNKNOWN_CREDITOR_KEY.to_string();
    }
    while words.len() > 1
        && words
            .last()
            .is_some_and(|word| CREDITOR_SUFFIXES.contains(&word.as_str()))
    {
        words.pop();
    }

    words.concat()
}

/// Canonical form of a date value so formatting differences are not mismatches.
pub fn normalize_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

pub fn normalize_amount(raw: &str) -> String {
    parse_amount(raw)
        .map(format_amount)
        .unwrap_or_else(|| raw.trim().to_string())
}

pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
