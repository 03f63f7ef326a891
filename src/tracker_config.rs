//! File configuration for the issue tracker client, read from
//! `.issuetracker/tracker.toml`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! endpoint = "http://localhost:3000/graphql"
//!
//! [ui]
//! toast_delay_ms = 3000
//!
//! [store]
//! location = ".issuetracker/issuetracker.db"
//! collection = "employees"
//! ```
//!
//! Every key is optional. The project file wins over the per-user file in
//! the platform config directory; environment and CLI overrides are applied
//! on top by [`crate::config::Config`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::docstore::is_valid_collection_name;

pub const TRACKER_DIR: &str = ".issuetracker";
pub const CONFIG_FILE: &str = "tracker.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    "http://localhost:3000/graphql".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// How long a notification stays up, in milliseconds. 0 keeps it until dismissed.
    #[serde(default = "default_toast_delay_ms")]
    pub toast_delay_ms: u64,
}

fn default_toast_delay_ms() -> u64 {
    3000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_delay_ms: default_toast_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Database file for the document store demo, relative to the project
    #[serde(default = "default_store_location")]
    pub location: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_store_location() -> String {
    format!("{}/issuetracker.db", TRACKER_DIR)
}

fn default_collection() -> String {
    "employees".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
            collection: default_collection(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackerToml {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl TrackerToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML")
    }

    /// Load the first config file that exists: the project's, then the
    /// user's. Falls back to defaults when neither does.
    pub fn load_layered(project_dir: &Path) -> Result<Self> {
        let candidates = [Some(config_path(project_dir)), global_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that do not stop the client from running.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let endpoint = self.api.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            warnings.push(format!(
                "api.endpoint '{}' is not an http(s) URL",
                self.api.endpoint
            ));
        }
        if self.ui.toast_delay_ms == 0 {
            warnings.push("ui.toast_delay_ms is 0; notifications stay until dismissed".into());
        }
        let collection = &self.store.collection;
        if !is_valid_collection_name(collection) {
            warnings.push(format!(
                "store.collection '{}' must be letters, digits and underscores",
                collection
            ));
        }
        warnings
    }
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(TRACKER_DIR).join(CONFIG_FILE)
}

/// Per-user config file, e.g. `~/.config/issuetracker/tracker.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("issuetracker").join(CONFIG_FILE))
}
