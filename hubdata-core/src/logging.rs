//! Logging initialization for binaries.
//!
//! The library only emits `tracing` events; a binary installs the subscriber
//! once at startup. `RUST_LOG` overrides the configured default level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is not set
    pub default_level: String,
    /// Include the module path of each event
    pub include_target: bool,
    /// Colored output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            include_target: false,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// `debug` when verbose, `info` otherwise.
    pub fn for_verbosity(verbose: bool) -> Self {
        Self {
            default_level: if verbose { "debug" } else { "info" }.to_string(),
            include_target: verbose,
            ..Default::default()
        }
    }
}

/// Install a stderr fmt subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.include_target)
        .with_ansi(config.ansi)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_selects_level() {
        assert_eq!(LogConfig::for_verbosity(true).default_level, "debug");
        assert_eq!(LogConfig::for_verbosity(false).default_level, "info");
        assert!(!LogConfig::default().include_target);
    }
}
