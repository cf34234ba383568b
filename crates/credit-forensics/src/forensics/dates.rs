use chrono::{DateTime, Duration, Months, NaiveDate};

/// Grace period added on top of the seven-year reporting window.
pub const REMOVAL_GRACE_DAYS: i64 = 180;
pub const REPORTING_WINDOW_YEARS: u32 = 7;

const DAYS_PER_YEAR: f64 = 365.25;

/// Parse the date shapes bureaus and extraction tools commonly emit.
///
/// Anything unrecognised is treated as absent rather than an error. Years
/// must carry four digits, except `MM/DD/YY` which pivots at 70 (`69` is
/// 2069, `70` is 1970).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    let groups: Vec<&str> = trimmed
        .split(|ch: char| !ch.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .collect();

    if has_four_digit_year(&groups) {
        for format in ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(date);
            }
        }

        // Month-only values ("03/2019", "2019-03") anchor to the first of the month.
        if let Ok(date) = NaiveDate::parse_from_str(&format!("01/{trimmed}"), "%d/%m/%Y") {
            return Some(date);
        }
        return NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok();
    }

    if is_two_digit_year(&groups) {
        for format in ["%m/%d/%y", "%m-%d-%y"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(date);
            }
        }
    }

    None
}

/// Exactly one four-digit group; every other group is a one or two digit month or day.
fn has_four_digit_year(groups: &[&str]) -> bool {
    groups.iter().filter(|group| group.len() == 4).count() == 1
        && groups
            .iter()
            .all(|group| group.len() == 4 || group.len() <= 2)
}

fn is_two_digit_year(groups: &[&str]) -> bool {
    matches!(groups, [month, day, year] if month.len() <= 2 && day.len() <= 2 && year.len() == 2)
}

pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// DOFD + 7 calendar years + 180 days.
pub fn reporting_removal_date(dofd: NaiveDate) -> Option<NaiveDate> {
    add_years(dofd, REPORTING_WINDOW_YEARS).and_then(|date| add_days(date, REMOVAL_GRACE_DAYS))
}

pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}
