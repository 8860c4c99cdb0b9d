//! Daily table: one row per week, a range string plus five weekday prices.

use super::week_range::{business_days, parse_week_range};
use super::{parse_price, RowFailure, SeriesReport};
use crate::series::{Granularity, PricePoint};
use crate::table::RawTable;

pub const WEEK_COLUMN: &str = "Week Of";
pub const WEEKDAY_COLUMNS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Expand every week into one point per business day.
///
/// Prices are taken Mon..Fri and zipped positionally against the business
/// days of the parsed range. Weeks are concatenated without deduplication.
pub(super) fn normalize_daily(table: &RawTable) -> SeriesReport {
    let Some(week_col) = table.column_index(WEEK_COLUMN) else {
        return SeriesReport::missing_column(Granularity::Day, WEEK_COLUMN, table);
    };
    let mut day_cols = Vec::with_capacity(WEEKDAY_COLUMNS.len());
    for name in WEEKDAY_COLUMNS {
        match table.column_index(name) {
            Some(col) => day_cols.push(col),
            None => return SeriesReport::missing_column(Granularity::Day, name, table),
        }
    }

    let mut report = SeriesReport::new(Granularity::Day);

    for row in 0..table.len() {
        let Some(range) = table.cell(row, week_col) else {
            report
                .failures
                .push(RowFailure::date_parse(row, "missing week range"));
            continue;
        };
        let (start, end) = match parse_week_range(range) {
            Ok(bounds) => bounds,
            Err(e) => {
                report.failures.push(RowFailure::date_parse(row, e.to_string()));
                continue;
            }
        };

        let prices: Result<Vec<Option<f64>>, String> = day_cols
            .iter()
            .map(|&col| parse_price(table.cell(row, col)))
            .collect();
        let prices = match prices {
            Ok(prices) => prices,
            Err(e) => {
                report.failures.push(RowFailure::normalization(row, e));
                continue;
            }
        };

        let days = business_days(start, end);
        if days.len() != prices.len() {
            report.failures.push(RowFailure::normalization(
                row,
                format!(
                    "week '{range}' has {} business days for {} prices",
                    days.len(),
                    prices.len()
                ),
            ));
            continue;
        }

        report.series.points.extend(
            days.into_iter()
                .zip(prices)
                .map(|(date, price)| PricePoint::new(date, price)),
        );
    }

    report
}
