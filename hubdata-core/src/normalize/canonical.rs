//! Re-reading a table that is already in `Date, Price` shape.

use chrono::NaiveDate;

use super::{parse_price, RowFailure, SeriesReport};
use crate::series::{Granularity, PricePoint};
use crate::table::RawTable;

/// Dates are ISO (`2001-01-01`) or, for yearly series, bare years (`1993`).
pub(super) fn normalize_canonical(table: &RawTable, granularity: Granularity) -> SeriesReport {
    let mut report = SeriesReport::new(granularity);

    for row in 0..table.len() {
        let date = match table.cell(row, 0).map(str::trim) {
            Some(text) => match parse_date(text) {
                Some(date) => date,
                None => {
                    report
                        .failures
                        .push(RowFailure::normalization(row, format!("invalid date '{text}'")));
                    continue;
                }
            },
            None => {
                report
                    .failures
                    .push(RowFailure::normalization(row, "missing date"));
                continue;
            }
        };

        match parse_price(table.cell(row, 1)) {
            Ok(price) => report.series.points.push(PricePoint::new(date, price)),
            Err(e) => report.failures.push(RowFailure::normalization(row, e)),
        }
    }

    report
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if text.len() == 4 {
        let year: i32 = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_dates_and_bare_years() {
        let table = RawTable::from_strs(
            &["Date", "Price"],
            &[&["2001-02-01", "1.9"], &["1993", "2.5"], &["yesterday", "1.0"]],
        );
        let report = normalize_canonical(&table, Granularity::Month);

        assert_eq!(report.series.len(), 2);
        assert_eq!(
            report.series.points[1].date,
            NaiveDate::from_ymd_opt(1993, 1, 1).unwrap()
        );
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].row, Some(2));
    }
}
