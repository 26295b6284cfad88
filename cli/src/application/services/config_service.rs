//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{OrbdeckConfig, apply_config_value};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<OrbdeckConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting.
///
/// Returns the updated configuration.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the file cannot be written.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<OrbdeckConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    tracing::info!(key, value, "configuration updated");
    Ok(config)
}
