//! Table normalization: reshape a period-specific raw grid into a
//! canonical, date-sorted [`PriceSeries`].
//!
//! Each period's page lays its table out differently:
//! - **Day**: one row per week, a `Week Of` range plus `Mon`..`Fri` prices
//! - **Month**: one row per year, a `Year` column plus twelve month columns
//! - **Year**: one row per decade, a `Decade` column plus `Year-N` offsets
//! - **Week**: passed through unchanged (no reshaping is defined for it)
//!
//! Row-level problems never abort normalization. They are collected as
//! [`RowFailure`]s next to the best-effort series so callers can count them.

mod canonical;
mod daily;
mod monthly;
pub mod week_range;
mod yearly;

pub use daily::{WEEKDAY_COLUMNS, WEEK_COLUMN};
pub use monthly::YEAR_COLUMN;
pub use week_range::{business_days, parse_week_range};
pub use yearly::DECADE_COLUMN;

use std::fmt;

use tracing::{debug, info, warn};

use crate::period::Period;
use crate::series::{Granularity, PriceSeries, SERIES_COLUMNS};
use crate::table::RawTable;

/// What went wrong with a single source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFailureKind {
    /// The week range could not be turned into dates; the week is skipped.
    DateParse,
    /// Any other reshape problem (bad number, unknown column, count mismatch).
    Normalization,
}

/// A source row (or, with `row: None`, the whole table) that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row: Option<usize>,
    pub kind: RowFailureKind,
    pub message: String,
}

impl RowFailure {
    pub fn date_parse(row: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            kind: RowFailureKind::DateParse,
            message: message.into(),
        }
    }

    pub fn normalization(row: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            kind: RowFailureKind::Normalization,
            message: message.into(),
        }
    }

    pub fn table(message: impl Into<String>) -> Self {
        Self {
            row: None,
            kind: RowFailureKind::Normalization,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "row {row}: {}", self.message),
            None => write!(f, "table: {}", self.message),
        }
    }
}

/// A normalized series plus the rows that could not be reshaped.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReport {
    pub series: PriceSeries,
    pub failures: Vec<RowFailure>,
}

impl SeriesReport {
    pub(crate) fn new(granularity: Granularity) -> Self {
        Self {
            series: PriceSeries::empty(granularity),
            failures: Vec::new(),
        }
    }

    pub(crate) fn missing_column(granularity: Granularity, name: &str, table: &RawTable) -> Self {
        let mut report = Self::new(granularity);
        report.failures.push(RowFailure::table(format!(
            "expected column '{name}', found {:?}",
            table.columns
        )));
        report
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn count(&self, kind: RowFailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }
}

/// Result of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Series(SeriesReport),
    /// Week tables: the canonicalized raw grid, untouched.
    Passthrough(RawTable),
}

impl Normalized {
    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            Normalized::Series(report) => Some(&report.series),
            Normalized::Passthrough(_) => None,
        }
    }

    pub fn failures(&self) -> &[RowFailure] {
        match self {
            Normalized::Series(report) => &report.failures,
            Normalized::Passthrough(_) => &[],
        }
    }

    /// Output rows: series points, or raw rows for a pass-through.
    pub fn len(&self) -> usize {
        match self {
            Normalized::Series(report) => report.series.len(),
            Normalized::Passthrough(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize a raw table for `period`.
///
/// Missing-value markers are nulled first, then the period's strategy melts
/// the grid. The returned series is sorted ascending by date (stable, so
/// overlapping weeks keep their source order). A table already in
/// `Date, Price` shape is re-read as-is, making normalization idempotent.
pub fn normalize(period: Period, table: RawTable) -> Normalized {
    let table = table.canonicalize_missing();
    debug!(%period, rows = table.len(), columns = ?table.columns, "normalizing table");

    let mut report = match period {
        Period::Week => {
            warn!("week tables are passed through without reshaping");
            return Normalized::Passthrough(table);
        }
        _ if table.has_columns(&SERIES_COLUMNS) => {
            canonical::normalize_canonical(&table, granularity_of(period))
        }
        Period::Day => daily::normalize_daily(&table),
        Period::Month => monthly::normalize_monthly(&table),
        Period::Year => yearly::normalize_yearly(&table),
    };

    report.series.sort_by_date();

    for failure in &report.failures {
        warn!(kind = ?failure.kind, "skipped {failure}");
    }
    info!(
        %period,
        points = report.series.len(),
        date_parse_failures = report.count(RowFailureKind::DateParse),
        normalization_failures = report.count(RowFailureKind::Normalization),
        "normalized table"
    );

    Normalized::Series(report)
}

fn granularity_of(period: Period) -> Granularity {
    match period {
        Period::Day | Period::Week => Granularity::Day,
        Period::Month => Granularity::Month,
        Period::Year => Granularity::Year,
    }
}

/// Parse a price cell. Null stays `None`; anything non-numeric is an error.
pub(crate) fn parse_price(cell: Option<&str>) -> Result<Option<f64>, String> {
    let Some(raw) = cell else {
        return Ok(None);
    };
    let text = raw.trim().replace(',', "");
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("invalid price '{raw}'")),
    }
}

/// Month number (1-12) from a full name or three-letter abbreviation.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let lower = name.trim().to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(lower.as_str())))
        .map(|i| i as u32 + 1)
}
