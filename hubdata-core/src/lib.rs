//! HubData Core — Henry Hub natural-gas spot prices, from HTML table to CSV.
//!
//! Pipeline stages, run strictly in order:
//! - Source lookup: period → page URL ([`period`])
//! - Acquisition: page fetch and table extraction ([`fetch`], [`html`])
//! - Normalization: period-specific grid → date-sorted series ([`normalize`])
//! - Export: `Date,Price` CSV ([`export`])
//!
//! [`pipeline::run`] wires the stages together.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod normalize;
pub mod period;
pub mod pipeline;
pub mod series;
pub mod table;

pub use config::HubConfig;
pub use error::{DateParseError, HubError};
pub use fetch::{fetch_table, HttpSource, PageSource};
pub use normalize::{normalize, parse_week_range, Normalized, RowFailure, RowFailureKind};
pub use period::{resolve, Period};
pub use pipeline::{run, RunReport};
pub use series::{Granularity, PricePoint, PriceSeries};
pub use table::RawTable;
