pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, LineColoring, PanelPosition, PingConfig, ProbeConfig, ThemeConfig,
};
pub use watcher::ConfigWatcher;

use ping_core::{PingError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `PingConfig::default()` if
/// the file doesn't exist so the indicator always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PingConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PingConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PingError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse a TOML document into a sanitized [`PingConfig`].
///
/// Only a syntax error fails.  A field with the wrong type is dropped with a
/// warning and takes its default, leaving the rest of its section intact.
pub fn parse(raw: &str) -> Result<PingConfig> {
    let mut root: toml::Table =
        toml::from_str(raw).map_err(|e| PingError::Config(format!("TOML parse error: {e}")))?;

    let config = PingConfig {
        probe:      section(&mut root, "probe"),
        display:    section(&mut root, "display"),
        thresholds: section(&mut root, "thresholds"),
        theme:      section(&mut root, "theme"),
    };

    Ok(config.sanitized())
}

/// Deserialize one top-level section, keeping every field that is valid on
/// its own.
fn section<T: DeserializeOwned + Default>(root: &mut toml::Table, name: &str) -> T {
    let entries = match root.remove(name) {
        None => return T::default(),
        Some(toml::Value::Table(entries)) => entries,
        Some(_) => {
            tracing::warn!("[{name}] is not a table; using defaults");
            return T::default();
        }
    };

    let mut accepted = toml::Table::new();
    for (key, value) in entries {
        accepted.insert(key.clone(), value);
        if toml::Value::Table(accepted.clone()).try_into::<T>().is_err() {
            tracing::warn!("{name}.{key} has an invalid value; using its default");
            accepted.remove(&key);
        }
    }

    toml::Value::Table(accepted).try_into().unwrap_or_default()
}

/// Like [`load`], but never fails: read or syntax errors are logged and the
/// defaults are returned instead.
pub fn load_or_default(path: impl AsRef<Path>) -> PingConfig {
    load(path).unwrap_or_else(|e| {
        tracing::warn!("{e}; using defaults.");
        PingConfig::default()
    })
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pingbar").join("pingbar.toml")
}
