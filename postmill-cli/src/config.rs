//! Config file and JSON document loading.
//!
//! The config file maps provider identifiers to their [`ProviderConfig`]:
//!
//! ```json
//! { "providers": { "pinterest": { "client_id": "..", "client_secret": "..",
//!                                 "redirect_base_url": "https://app.example.com" } } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use postmill_core::{ProviderConfig, ProviderKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Returns the default config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("postmill"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Contents of the config file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Provider configuration keyed by identifier.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl CliConfig {
    /// Loads the config from `path`, or from the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(default_config_path, Path::to_path_buf);
        debug!(path = %path.display(), "Loading config");

        if !path.exists() {
            bail!(
                "Config file not found at {}; create it or pass --config",
                path.display()
            );
        }
        read_json(&path)
    }

    /// Returns the validated configuration of one provider.
    pub fn provider(&self, kind: ProviderKind) -> Result<ProviderConfig> {
        let config = self
            .providers
            .get(kind.identifier())
            .cloned()
            .with_context(|| format!("No configuration for provider '{}'", kind.identifier()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Reads and parses a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Writes a value as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "JSON file written");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
