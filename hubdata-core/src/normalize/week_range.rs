//! Week-range strings ("1997 Jan- 6 to Jan-10") and business-day expansion.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use super::month_number;
use crate::error::DateParseError;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}").expect("valid year pattern"));

/// `<year><Mon>-<day>` anchored at the start. Month letters are case-insensitive.
static START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})((?i)[JFMAMJJASOND][A-Z]{2})-([0-9]{1,2})")
        .expect("valid start pattern")
});

/// `<Mon>-<day>` anchored at the end.
static END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?i)[JFMAMJJASOND][A-Z]{2})-([0-9]{1,2})$").expect("valid end pattern")
});

/// Parse a week range into inclusive `(start, end)` dates.
///
/// Whitespace is ignored, so `"1997 Jan- 6 to Jan-10"` and `"1997JAN-06JAN-10"`
/// are equivalent. The end fragment carries no year of its own: it borrows the
/// leading year and rolls forward one year when that would put it before the
/// start (`"1997DEC-29JAN-02"` ends on 1998-01-02).
pub fn parse_week_range(s: &str) -> Result<(NaiveDate, NaiveDate), DateParseError> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    let year = YEAR_RE
        .find(&cleaned)
        .ok_or_else(|| DateParseError::MissingYear(s.to_string()))?
        .as_str();

    let start = START_RE
        .captures(&cleaned)
        .ok_or_else(|| DateParseError::MissingStart(s.to_string()))?;
    let end = END_RE
        .captures(&cleaned)
        .ok_or_else(|| DateParseError::MissingEnd(s.to_string()))?;

    let start_date = ymd(&start[1], &start[2], &start[3])?;
    let mut end_date = ymd(year, &end[1], &end[2])?;

    if end_date < start_date {
        end_date = end_date
            .checked_add_months(Months::new(12))
            .ok_or_else(|| DateParseError::InvalidDate(s.to_string()))?;
    }

    Ok((start_date, end_date))
}

fn ymd(year: &str, month: &str, day: &str) -> Result<NaiveDate, DateParseError> {
    let invalid = || DateParseError::InvalidDate(format!("{year}{month}-{day}"));

    let y: i32 = year.parse().map_err(|_| invalid())?;
    let m = month_number(month).ok_or_else(invalid)?;
    let d: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)
}

/// Weekdays (Mon–Fri) from `start` to `end`, both inclusive.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}
