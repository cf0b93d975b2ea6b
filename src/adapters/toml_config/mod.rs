// TOML config adapter - Tool configuration from TOML files and the environment

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::*;
use crate::utils::logging::{validate_log_level, LogFormat, LoggingConfig};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "clipbatch.toml";

/// Environment variables and the config key each one overrides
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CLIPBATCH_FFMPEG", "ffmpeg_path"),
    ("CLIPBATCH_BACKUP", "backup"),
    ("CLIPBATCH_LOG_LEVEL", "log_level"),
    ("CLIPBATCH_LOG_FORMAT", "log_format"),
];

/// Resolved tool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Transcoder program
    pub ffmpeg_path: PathBuf,
    /// Keep `<manifest>.backup` before rewriting a manifest
    pub backup: bool,
    pub logging: LoggingConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            backup: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Optional overrides, one layer of the configuration hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub ffmpeg_path: Option<String>,
    pub backup: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    clipbatch: ConfigOverrides,
}

impl ToolConfig {
    /// Apply one layer on top of the current values
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(ffmpeg_path) = &overrides.ffmpeg_path {
            self.ffmpeg_path = PathBuf::from(ffmpeg_path);
        }
        if let Some(backup) = overrides.backup {
            self.backup = backup;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_log_level(&self.logging.level)?;
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(DomainError::Config("ffmpeg_path cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Deserialize config from TOML string; keys live under `[clipbatch]`
    pub fn parse(toml_content: &str) -> Result<ConfigOverrides, DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(parsed.clipbatch)
    }

    /// Load configuration from file
    pub fn load(file_path: &Path) -> Result<ConfigOverrides, DomainError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Collect overrides from environment variables via `lookup`
    pub fn from_env<F>(lookup: F) -> Result<ConfigOverrides, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = ConfigOverrides::default();

        for &(env_var, config_key) in ENV_MAPPINGS {
            let Some(value) = lookup(env_var) else {
                continue;
            };
            match config_key {
                "ffmpeg_path" => overrides.ffmpeg_path = Some(value),
                "backup" => {
                    overrides.backup = Some(parse_bool(&value).ok_or_else(|| {
                        DomainError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            env_var, value
                        ))
                    })?)
                }
                "log_level" => overrides.log_level = Some(value),
                "log_format" => overrides.log_format = Some(value.parse()?),
                _ => {}
            }
        }

        Ok(overrides)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_config_section() {
        let overrides = TomlConfigAdapter::parse(
            r#"
            [clipbatch]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            backup = false
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(overrides.ffmpeg_path.as_deref(), Some("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(overrides.backup, Some(false));
        assert_eq!(overrides.log_format, Some(LogFormat::Json));
        assert_eq!(overrides.log_level, None);
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert_eq!(TomlConfigAdapter::parse("").unwrap(), ConfigOverrides::default());
        assert!(TomlConfigAdapter::parse("[clipbatch]\nbackup = \"maybe\"").is_err());
        assert!(TomlConfigAdapter::parse("[clipbatch]\nunknown = 1").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CLIPBATCH_FFMPEG", "/usr/local/bin/ffmpeg"),
            ("CLIPBATCH_BACKUP", "off"),
            ("CLIPBATCH_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let overrides =
            TomlConfigAdapter::from_env(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(overrides.ffmpeg_path.as_deref(), Some("/usr/local/bin/ffmpeg"));
        assert_eq!(overrides.backup, Some(false));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.log_format, None);
    }

    #[test]
    fn test_env_invalid_boolean() {
        let result = TomlConfigAdapter::from_env(|key| {
            (key == "CLIPBATCH_BACKUP").then(|| "sometimes".to_string())
        });
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_apply_layers() {
        let mut config = ToolConfig::default();
        config.apply(&ConfigOverrides {
            backup: Some(false),
            log_level: Some("warn".to_string()),
            ..Default::default()
        });
        config.apply(&ConfigOverrides {
            log_level: Some("debug".to_string()),
            ..Default::default()
        });

        assert!(!config.backup);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert!(config.validate().is_ok());
    }
}
