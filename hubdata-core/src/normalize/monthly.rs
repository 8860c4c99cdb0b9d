//! Monthly table: one row per year, one column per month.

use chrono::NaiveDate;

use super::{month_number, parse_price, RowFailure, SeriesReport};
use crate::series::{Granularity, PricePoint};
use crate::table::RawTable;

pub const YEAR_COLUMN: &str = "Year";

/// Melt year × month cells into one point per month (dated the 1st).
///
/// A cell whose date cannot be built (non-numeric year, unknown month) is a
/// failure for that cell only; the rest of the table still normalizes.
pub(super) fn normalize_monthly(table: &RawTable) -> SeriesReport {
    let Some(year_col) = table.column_index(YEAR_COLUMN) else {
        return SeriesReport::missing_column(Granularity::Month, YEAR_COLUMN, table);
    };
    let mut report = SeriesReport::new(Granularity::Month);

    for row in 0..table.len() {
        let year_cell = table.cell(row, year_col);
        let year = year_cell.and_then(|y| y.trim().parse::<i32>().ok());

        for (col, name) in table.columns.iter().enumerate() {
            if col == year_col {
                continue;
            }
            let date = year.and_then(|y| NaiveDate::from_ymd_opt(y, month_number(name)?, 1));
            let Some(date) = date else {
                report.failures.push(RowFailure::normalization(
                    row,
                    format!("cannot build a date from year {year_cell:?} and month '{name}'"),
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
