//! Page retrieval.
//!
//! The [`PageSource`] trait abstracts over where the HTML comes from so the
//! pipeline can run against fixtures in tests. [`HttpSource`] is the real
//! implementation: a blocking reqwest client with a timeout and a small retry
//! loop with exponential backoff for transient failures.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::error::HubError;
use crate::html::extract_table;
use crate::table::RawTable;

/// Anything that can return the HTML of a page by URL.
pub trait PageSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the page body. Non-success responses are `HubError::Network`.
    fn fetch_page(&self, url: &str) -> Result<String, HubError>;
}

/// HTTP page source.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpSource {
    pub fn new(config: &HttpConfig) -> Result<Self, HubError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HubError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Single GET. `Ok(Err(..))` means the failure is worth retrying.
    fn attempt(&self, url: &str) -> Result<Result<String, HubError>, HubError> {
        match self.client.get(url).send() {
            Ok(resp) => {
                let status = resp.status();
                if status.is_server_error() {
                    return Ok(Err(HubError::Network(format!("HTTP {status} for {url}"))));
                }
                if !status.is_success() {
                    return Err(HubError::Network(format!("HTTP {status} for {url}")));
                }
                resp.text()
                    .map(Ok)
                    .map_err(|e| HubError::Network(format!("failed to read body of {url}: {e}")))
            }
            Err(e) if e.is_connect() || e.is_timeout() => {
                Ok(Err(HubError::Network(format!("{url}: {e}"))))
            }
            Err(e) => Err(HubError::Network(format!("{url}: {e}"))),
        }
    }
}

impl PageSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_page(&self, url: &str) -> Result<String, HubError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, ?delay, "retrying");
                std::thread::sleep(delay);
            }

            match self.attempt(url)? {
                Ok(body) => {
                    info!(url, bytes = body.len(), "fetched page");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(attempt, "transient fetch failure: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HubError::Network(format!("{url}: max retries exceeded"))))
    }
}

/// Fetch `url` from `source` and extract the table with the given summary.
pub fn fetch_table(source: &dyn PageSource, url: &str, summary: &str) -> Result<RawTable, HubError> {
    let html = source.fetch_page(url)?;
    extract_table(&html, summary)
}
