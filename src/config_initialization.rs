//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};

use crate::adapters::toml_config::{
    ConfigOverrides, TomlConfigAdapter, ToolConfig, DEFAULT_CONFIG_FILE,
};
use crate::cli::Cli;

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<ToolConfig> {
    initialize_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an explicit environment lookup
pub fn initialize_with_env<F>(cli: &Cli, lookup: F) -> Result<ToolConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Step 1: defaults
    let mut config = ToolConfig::default();

    // Step 2: config file
    if let Some(overrides) = load_config_file(cli)? {
        config.apply(&overrides);
    }

    // Step 3: environment
    let env_overrides =
        TomlConfigAdapter::from_env(lookup).context("Invalid environment configuration")?;
    config.apply(&env_overrides);

    // Step 4: command line
    config.apply(&cli_overrides(cli));

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// An explicit `--config` must exist, the default file is optional
fn load_config_file(cli: &Cli) -> Result<Option<ConfigOverrides>> {
    if let Some(path) = &cli.config {
        let overrides = TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        return Ok(Some(overrides));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        let overrides = TomlConfigAdapter::load(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()))?;
        return Ok(Some(overrides));
    }

    Ok(None)
}

/// Apply CLI argument overrides to configuration
fn cli_overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        ffmpeg_path: cli
            .ffmpeg
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
        backup: cli.command.no_backup().then_some(false),
        log_level: cli.log_level.clone(),
        log_format: cli.log_format,
    }
}
