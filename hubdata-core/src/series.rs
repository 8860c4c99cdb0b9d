//! Canonical (Date, Price) series produced by the normalizer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::RawTable;

/// Header of every exported series.
pub const SERIES_COLUMNS: [&str; 2] = ["Date", "Price"];

/// Calendar resolution of the dates in a series.
///
/// Month dates fall on the 1st; year dates on January 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Month,
    Year,
}

/// One observation. `price` is `None` for a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Option<f64>) -> Self {
        Self { date, price }
    }
}

/// Ordered price observations at a single granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub granularity: Granularity,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(granularity: Granularity, points: Vec<PricePoint>) -> Self {
        Self {
            granularity,
            points,
        }
    }

    pub fn empty(granularity: Granularity) -> Self {
        Self::new(granularity, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Stable ascending sort by date; equal dates keep their input order.
    pub fn sort_by_date(&mut self) {
        self.points.sort_by_key(|p| p.date);
    }

    pub fn is_sorted(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date <= w[1].date)
    }

    /// Render back into a `Date, Price` grid, the shape the exporter writes.
    pub fn to_raw_table(&self) -> RawTable {
        let mut table = RawTable::new(SERIES_COLUMNS.iter().map(|c| c.to_string()).collect());
        for p in &self.points {
            table.push_row(vec![
                Some(p.date.format("%Y-%m-%d").to_string()),
                p.price.map(|v| v.to_string()),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sort_is_stable_for_duplicate_dates() {
        let mut series = PriceSeries::new(
            Granularity::Day,
            vec![
                PricePoint::new(d(2000, 1, 4), Some(3.0)),
                PricePoint::new(d(2000, 1, 3), Some(1.0)),
                PricePoint::new(d(2000, 1, 3), Some(2.0)),
            ],
        );
        series.sort_by_date();

        assert!(series.is_sorted());
        let prices: Vec<_> = series.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn to_raw_table_uses_iso_dates_and_null_prices() {
        let series = PriceSeries::new(
            Granularity::Month,
            vec![
                PricePoint::new(d(2001, 1, 1), Some(1.8)),
                PricePoint::new(d(2001, 2, 1), None),
            ],
        );
        let table = series.to_raw_table();

        assert_eq!(table.columns, vec!["Date", "Price"]);
        assert_eq!(table.cell(0, 0), Some("2001-01-01"));
        assert_eq!(table.cell(0, 1), Some("1.8"));
        assert_eq!(table.cell(1, 1), None);
    }
}
