//! Run configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock EIA setup. Configuration is always passed explicitly; nothing here
//! reads the process environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HubError;
use crate::html::DEFAULT_TABLE_SUMMARY;
use crate::period::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HubConfig {
    pub source: SourceConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

impl HubConfig {
    pub fn from_toml(text: &str) -> Result<Self, HubError> {
        toml::from_str(text).map_err(|e| HubError::Configuration(format!("invalid config: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self, HubError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HubError::Configuration(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }
}

/// Where the page lives and which table on it to read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub table_summary: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            table_summary: DEFAULT_TABLE_SUMMARY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Extra attempts after the first, for connect/timeout/5xx failures only.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 2,
            retry_delay_ms: 500,
            user_agent: concat!("hubdata/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for derived filenames. Explicit filenames are used as given.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(HubConfig::from_toml("").unwrap(), HubConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let config = HubConfig::from_toml(
            r#"
[http]
timeout_secs = 5

[output]
dir = "data"
"#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.output.dir, PathBuf::from("data"));
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_configuration_error() {
        let err = HubConfig::from_toml("[http]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, HubError::Configuration(_)));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = HubConfig::from_file(Path::new("/nonexistent/hubdata.toml")).unwrap_err();
        assert!(matches!(err, HubError::Configuration(_)));
    }
}
