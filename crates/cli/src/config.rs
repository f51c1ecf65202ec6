//! Persisted addon configuration.
//!
//! A single setting, the Subs.ro API key, stored as a small JSON file so a
//! cleared or newly entered credential survives across invocations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Settings {
    #[serde(default)]
    api_key: Option<String>,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Config location: `$ROSUB_CONFIG`, or `rosub/config.json` under the
    /// platform config directory.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("ROSUB_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("rosub")
            .join("config.json")
    }

    /// The stored API key, if a non-blank one is present. A missing or
    /// unreadable file simply means no credential yet.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let settings: Settings = serde_json::from_str(&raw).ok()?;
        settings
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn save(&self, api_key: &str) -> Result<()> {
        self.write(Settings {
            api_key: Some(api_key.trim().to_string()),
        })
    }

    /// Forget the stored key so the next action re-prompts.
    pub fn clear(&self) -> Result<()> {
        debug!(path = %self.path.display(), "clearing stored api key");
        self.write(Settings { api_key: None })
    }

    fn write(&self, settings: Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
