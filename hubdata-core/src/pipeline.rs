//! End-to-end run: resolve → fetch → extract → normalize → export.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use crate::config::HubConfig;
use crate::error::HubError;
use crate::export::{default_filename, export_series, export_table};
use crate::fetch::{fetch_table, PageSource};
use crate::normalize::{normalize, Normalized, RowFailure};
use crate::period::Period;

/// Outcome of a single run.
#[derive(Debug)]
pub struct RunReport {
    pub period: Period,
    pub url: String,
    /// Rows in the normalized output (points, or raw rows for Week).
    pub rows: usize,
    pub failures: Vec<RowFailure>,
    /// Path written, `None` when there was nothing to write.
    pub written: Option<PathBuf>,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Run the pipeline, naming derived output files after today's local date.
pub fn run(
    config: &HubConfig,
    period: Period,
    filename: Option<&Path>,
    source: &dyn PageSource,
) -> Result<RunReport, HubError> {
    run_on(config, period, filename, source, chrono::Local::now().date_naive())
}

/// Run the pipeline with an explicit date for the derived filename.
///
/// Network and parse failures return early; nothing is exported.
pub fn run_on(
    config: &HubConfig,
    period: Period,
    filename: Option<&Path>,
    source: &dyn PageSource,
    today: NaiveDate,
) -> Result<RunReport, HubError> {
    let _span = info_span!("run", %period).entered();

    let url = period.resolve_with(&config.source.base_url);
    info!(%url, source = source.name(), "fetching");
    let table = fetch_table(source, &url, &config.source.table_summary)?;

    let normalized = normalize(period, table);
    let rows = normalized.len();
    let failures = normalized.failures().to_vec();

    let path = match filename {
        Some(path) => path.to_path_buf(),
        None => config.output.dir.join(default_filename(period, today)),
    };

    let written = match &normalized {
        Normalized::Series(report) => export_series(&report.series, &path)?,
        Normalized::Passthrough(table) => export_table(table, &path)?,
    };

    if written.is_none() {
        warn!("no data available for {period}");
    }
    if !failures.is_empty() {
        warn!(count = failures.len(), "rows skipped during normalization");
    }

    Ok(RunReport {
        period,
        url,
        rows,
        failures,
        written,
    })
}
