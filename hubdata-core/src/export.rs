//! CSV export of normalized series (and of pass-through tables).
//!
//! Series are written as `Date,Price` with ISO dates and an empty field for a
//! missing price. Nothing is written, and no file is created, for an empty
//! series.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::HubError;
use crate::period::Period;
use crate::series::{PriceSeries, SERIES_COLUMNS};
use crate::table::RawTable;

/// `<period>_<YYYYMMDD>.csv`
pub fn default_filename(period: Period, date: NaiveDate) -> String {
    format!("{}_{}.csv", period.as_str(), date.format("%Y%m%d"))
}

/// Write a series as CSV into any writer.
pub fn write_series<W: Write>(series: &PriceSeries, writer: W) -> Result<(), HubError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SERIES_COLUMNS)?;
    for p in &series.points {
        wtr.write_record([
            p.date.format("%Y-%m-%d").to_string(),
            p.price.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a raw table as CSV: its own header, null cells empty.
pub fn write_table<W: Write>(table: &RawTable, writer: W) -> Result<(), HubError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn series_to_csv(series: &PriceSeries) -> Result<String, HubError> {
    let mut buf = Vec::new();
    write_series(series, &mut buf)?;
    into_string(buf)
}

pub fn table_to_csv(table: &RawTable) -> Result<String, HubError> {
    let mut buf = Vec::new();
    write_table(table, &mut buf)?;
    into_string(buf)
}

/// Write `series` to `path`. Returns `None`, without touching the
/// filesystem, when the series is empty.
pub fn export_series(series: &PriceSeries, path: &Path) -> Result<Option<PathBuf>, HubError> {
    if series.is_empty() {
        info!("series is empty; nothing written");
        return Ok(None);
    }
    let file = create(path)?;
    write_series(series, file)?;
    info!(path = %path.display(), rows = series.len(), "wrote series");
    Ok(Some(path.to_path_buf()))
}

/// Write a pass-through table to `path`; `None` when the table has no rows.
pub fn export_table(table: &RawTable, path: &Path) -> Result<Option<PathBuf>, HubError> {
    if table.is_empty() {
        info!("table is empty; nothing written");
        return Ok(None);
    }
    let file = create(path)?;
    write_table(table, file)?;
    info!(path = %path.display(), rows = table.len(), "wrote table");
    Ok(Some(path.to_path_buf()))
}

fn create(path: &Path) -> Result<std::fs::File, HubError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::fs::File::create(path)?)
}

fn into_string(buf: Vec<u8>) -> Result<String, HubError> {
    String::from_utf8(buf)
        .map_err(|e| HubError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Granularity, PricePoint};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_filename_uses_period_and_date() {
        assert_eq!(default_filename(Period::Day, d(2024, 3, 7)), "day_20240307.csv");
        assert_eq!(default_filename(Period::Year, d(1999, 12, 31)), "year_19991231.csv");
    }

    #[test]
    fn series_csv_has_header_iso_dates_and_empty_nulls() {
        let series = PriceSeries::new(
            Granularity::Day,
            vec![
                PricePoint::new(d(1997, 1, 6), Some(3.82)),
                PricePoint::new(d(1997, 1, 7), None),
            ],
        );
        assert_eq!(
            series_to_csv(&series).unwrap(),
            "Date,Price\n1997-01-06,3.82\n1997-01-07,\n"
        );
    }

    #[test]
    fn table_csv_keeps_source_columns() {
        let table = RawTable::from_strs(&["Week Of", "Price"], &[&["1997 Jan-10", ""]]);
        assert_eq!(table_to_csv(&table).unwrap(), "Week Of,Price\n1997 Jan-10,\n");
    }

    #[test]
    fn empty_series_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day_20240101.csv");

        let written = export_series(&PriceSeries::empty(Granularity::Day), &path).unwrap();
        assert!(written.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn export_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let series = PriceSeries::new(
            Granularity::Year,
            vec![PricePoint::new(d(1997, 1, 1), Some(2.49))],
        );

        let written = export_series(&series, &path).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Date,Price\n1997-01-01,2.49\n"
        );
    }
}
