//! Configuration loading functionality.
//!
//! Resolves the config path, creates the default file when missing, applies
//! the `PORT` environment override, validates and fills in defaults.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::*;
use crate::panchang::Zodiac;
use crate::time::DstGapPolicy;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
/// Returns None if using the default directory.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Path of `panchang.toml`, honoring `--config`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir.join(CONFIG_FILE_NAME));
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
        log_block_start!(
            "Created default configuration at {}",
            private_path(&config_path)
        );
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// This version does NOT create a default config if the path doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "Configuration file not found at {}",
            private_path(path)
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config = parse_config(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    apply_port_override(&mut config, std::env::var(PORT_ENV_VAR).ok())?;

    validate_config(&config)?;

    apply_defaults(&mut config);

    Ok(config)
}

/// Deserialize config text without validation.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Hosting platforms hand out the listen port through `PORT`; it wins over
/// the file. Empty values are ignored.
pub fn apply_port_override(config: &mut Config, env_value: Option<String>) -> Result<()> {
    let Some(raw) = env_value else {
        return Ok(());
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }

    let port: u16 = raw.parse().with_context(|| {
        format!("{PORT_ENV_VAR} environment variable ({raw}) is not a valid port number")
    })?;
    config.port = Some(port);
    Ok(())
}

/// Apply default values to configuration fields.
pub fn apply_defaults(config: &mut Config) {
    config.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    config.port.get_or_insert(DEFAULT_PORT);
    config.workers.get_or_insert(DEFAULT_WORKERS);
    config
        .cors_origin
        .get_or_insert_with(|| DEFAULT_CORS_ORIGIN.to_string());
    config
        .timezone
        .get_or_insert_with(|| DEFAULT_TIMEZONE.to_string());
    config.latitude.get_or_insert(DEFAULT_LATITUDE);
    config.longitude.get_or_insert(DEFAULT_LONGITUDE);
    config.dst_gap.get_or_insert(DstGapPolicy::default());
    config.zodiac.get_or_insert(Zodiac::default());
}

/// Replace the home directory prefix with `~` for display.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}
