//! Reporting period selector and source URL lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HubError;

/// Default location of the EIA natural-gas history pages.
pub const DEFAULT_BASE_URL: &str = "http://www.eia.gov/dnav/ng/hist";

/// Reporting granularity of the spot-price page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    /// EIA series code of the page holding this period's table.
    pub fn series_code(self) -> &'static str {
        match self {
            Period::Day => "rngwhhdD",
            Period::Week => "rngwhhdW",
            Period::Month => "rngwhhdM",
            Period::Year => "rngwhhdA",
        }
    }

    /// Lowercase name, also used as the output filename stem.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Source URL under the default EIA base.
    pub fn resolve(self) -> String {
        self.resolve_with(DEFAULT_BASE_URL)
    }

    /// Source URL under a caller-supplied base (mirrors, fixtures).
    pub fn resolve_with(self, base_url: &str) -> String {
        format!("{}/{}.htm", base_url.trim_end_matches('/'), self.series_code())
    }
}

/// Free-function form of [`Period::resolve`].
pub fn resolve(period: Period) -> String {
    period.resolve()
}

impl FromStr for Period {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(HubError::Configuration(format!(
                "unknown period '{other}'. Valid: day, week, month, year"
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
