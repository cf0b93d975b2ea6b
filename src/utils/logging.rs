//! Logging configuration and subscriber setup

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Pretty,
    /// Compact text format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl FromStr for LogFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(DomainError::Config(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

fn is_plain_level(level: &str) -> bool {
    LEVELS.contains(&level.trim().to_lowercase().as_str())
}

/// Check that `level` is a log level or an `EnvFilter` directive list such as `clipbatch=debug,warn`
pub fn validate_log_level(level: &str) -> Result<(), DomainError> {
    if is_plain_level(level) {
        return Ok(());
    }
    // A bare word would be read as a target name, so directives need `=` or `,`
    let looks_like_directives = level.contains('=') || level.contains(',');
    if looks_like_directives && EnvFilter::try_new(level.trim()).is_ok() {
        return Ok(());
    }
    Err(DomainError::Config(format!(
        "Invalid log level: {}. Use one of {} or a filter such as clipbatch=debug",
        level,
        LEVELS.join(", ")
    )))
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Install the global subscriber, writing to stderr
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init(&self) -> Result<(), DomainError> {
        validate_log_level(&self.config.level)?;
        let directives = if is_plain_level(&self.config.level) {
            self.config.level.trim().to_lowercase()
        } else {
            self.config.level.trim().to_string()
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match self.config.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("debug").is_ok());
        assert!(validate_log_level("WARN").is_ok());
        assert!(validate_log_level("loud").is_err());
    }

    #[test]
    fn test_validate_accepts_filter_directives() {
        assert!(validate_log_level("clipbatch=debug").is_ok());
        assert!(validate_log_level("warn,clipbatch=trace").is_ok());
        assert!(validate_log_level("chatty").is_err());
    }

    #[test]
    fn test_init_is_repeatable() {
        let system = LoggingSystem::new(LoggingConfig::default());
        assert!(system.init().is_ok());
        assert!(system.init().is_ok());
    }
}
