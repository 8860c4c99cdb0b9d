//! Annual table: one row per decade, `Year-N` offset columns.

use chrono::NaiveDate;

use super::{parse_price, RowFailure, SeriesReport};
use crate::series::{Granularity, PricePoint};
use crate::table::RawTable;

pub const DECADE_COLUMN: &str = "Decade";

const OFFSET_PREFIX: &str = "Year-";

/// Melt decade × offset cells into one point per year (dated January 1).
pub(super) fn normalize_yearly(table: &RawTable) -> SeriesReport {
    let Some(decade_col) = table.column_index(DECADE_COLUMN) else {
        return SeriesReport::missing_column(Granularity::Year, DECADE_COLUMN, table);
    };
    let mut report = SeriesReport::new(Granularity::Year);

    for row in 0..table.len() {
        let decade = match table.cell(row, decade_col).and_then(parse_decade) {
            Some(decade) => decade,
            None => {
                report.failures.push(RowFailure::normalization(
                    row,
                    format!("invalid decade {:?}", table.cell(row, decade_col)),
                ));
                continue;
            }
        };

        for (col, name) in table.columns.iter().enumerate() {
            if col == decade_col {
                continue;
            }
            let Some(offset) = parse_offset(name) else {
                report.failures.push(RowFailure::normalization(
                    row,
                    format!("invalid year offset column '{name}'"),
                ));
                continue;
            };
            let Some(date) = decade
                .checked_add(offset)
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            else {
                report.failures.push(RowFailure::normalization(
                    row,
                    format!("year {decade} + {offset} out of range"),
                ));
                continue;
            };
            match parse_price(table.cell(row, col)) {
                Ok(price) => report.series.points.push(PricePoint::new(date, price)),
                Err(e) => report
                    .failures
                    .push(RowFailure::normalization(row, format!("{name}: {e}"))),
            }
        }
    }

    report
}

/// `"1990's"` -> 1990
fn parse_decade(text: &str) -> Option<i32> {
    text.trim().trim_end_matches("'s").trim().parse().ok()
}

/// `"Year-3"` -> 3
fn parse_offset(name: &str) -> Option<i32> {
    name.trim().strip_prefix(OFFSET_PREFIX)?.trim().parse().ok()
}
