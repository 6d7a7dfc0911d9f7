//! # Configuration Loader
//!
//! Reads the TOML file and maps it into the [`AppConfig`] DTO.
//!
//! `load_config` is pure data loading: no validation and no defaults.
//! Whatever is in the file is a fact. The only fallback lives in
//! [`load_config_or_defaults`], for a file that does not exist at all.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rr_core::config::AppConfig;
use tracing::info;

const APP_DIR_NAME: &str = "rider-rewards";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Loads `config_path`, or the development defaults when it does not exist.
pub fn load_config_or_defaults(config_path: &Path) -> anyhow::Result<AppConfig> {
    if config_path.exists() {
        return load_config(config_path);
    }
    info!(
        path = %config_path.display(),
        "config file not found, using defaults"
    );
    Ok(AppConfig::with_system_defaults(default_data_dir()?))
}

/// `<config dir>/rider-rewards/config.toml`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to resolve the user config directory")?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("Failed to resolve the local data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
