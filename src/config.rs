use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::tracker_config::TrackerToml;

/// Environment variables that override `api.endpoint`, strongest first.
pub const ENDPOINT_ENV_VARS: [&str; 2] = ["ISSUETRACKER_API_ENDPOINT", "UI_API_ENDPOINT"];

/// Effective runtime configuration: the config file, then environment
/// (including a project `.env`), then CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub endpoint: String,
    /// `None` keeps notifications up until dismissed.
    pub toast_delay: Option<Duration>,
    pub store_location: String,
    pub store_collection: String,
    pub verbose: bool,
}

impl Config {
    pub fn new(project_dir: PathBuf, endpoint: Option<String>, verbose: bool) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let env_file = project_dir.join(".env");
        if env_file.exists() {
            dotenvy::from_path(&env_file)
                .with_context(|| format!("Failed to load {}", env_file.display()))?;
        }
        let toml = TrackerToml::load_layered(&project_dir)?;
        Ok(Self::resolve(
            project_dir,
            &toml,
            |key| std::env::var(key).ok(),
            endpoint,
            verbose,
        ))
    }

    /// Combine the layers. `env` looks up one environment variable.
    pub fn resolve(
        project_dir: PathBuf,
        toml: &TrackerToml,
        env: impl Fn(&str) -> Option<String>,
        endpoint: Option<String>,
        verbose: bool,
    ) -> Self {
        let endpoint = endpoint
            .or_else(|| {
                ENDPOINT_ENV_VARS
                    .iter()
                    .find_map(|key| env(key).filter(|v| !v.trim().is_empty()))
            })
            .unwrap_or_else(|| toml.api.endpoint.clone());

        let toast_delay =
            (toml.ui.toast_delay_ms > 0).then(|| Duration::from_millis(toml.ui.toast_delay_ms));

        let store_location = resolve_location(&project_dir, &toml.store.location);

        Self {
            project_dir,
            endpoint,
            toast_delay,
            store_location,
            store_collection: toml.store.collection.clone(),
            verbose,
        }
    }
}

fn resolve_location(project_dir: &Path, location: &str) -> String {
    if location == ":memory:" || Path::new(location).is_absolute() {
        location.to_string()
    } else {
        project_dir.join(location).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_file_value_used_without_overrides() {
        let config = Config::resolve(
            PathBuf::from("/work"),
            &TrackerToml::default(),
            env_of(&[]),
            None,
            false,
        );
        assert_eq!(config.endpoint, "http://localhost:3000/graphql");
        assert_eq!(config.toast_delay, Some(Duration::from_millis(3000)));
        assert_eq!(config.store_location, "/work/.issuetracker/issuetracker.db");
        assert_eq!(config.store_collection, "employees");
    }

    #[test]
    fn test_env_overrides_file_in_priority_order() {
        let config = Config::resolve(
            PathBuf::from("/work"),
            &TrackerToml::default(),
            env_of(&[
                ("UI_API_ENDPOINT", "http://ui:8000/graphql"),
                ("ISSUETRACKER_API_ENDPOINT", "http://api:9000/graphql"),
            ]),
            None,
            false,
        );
        assert_eq!(config.endpoint, "http://api:9000/graphql");

        let config = Config::resolve(
            PathBuf::from("/work"),
            &TrackerToml::default(),
            env_of(&[("UI_API_ENDPOINT", "http://ui:8000/graphql")]),
            None,
            false,
        );
        assert_eq!(config.endpoint, "http://ui:8000/graphql");
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = Config::resolve(
            PathBuf::from("/work"),
            &TrackerToml::default(),
            env_of(&[("ISSUETRACKER_API_ENDPOINT", "http://api:9000/graphql")]),
            Some("http://cli/graphql".into()),
            true,
        );
        assert_eq!(config.endpoint, "http://cli/graphql");
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_delay_disables_auto_hide_and_absolute_store_kept() {
        let mut toml = TrackerToml::default();
        toml.ui.toast_delay_ms = 0;
        toml.store.location = "/data/store.db".into();
        let config = Config::resolve(PathBuf::from("/work"), &toml, env_of(&[]), None, false);
        assert!(config.toast_delay.is_none());
        assert_eq!(config.store_location, "/data/store.db");
    }

    #[test]
    fn test_new_reads_project_file() {
        let dir = tempdir().unwrap();
        let mut toml = TrackerToml::default();
        toml.store.collection = "staff".into();
        toml.save(&crate::tracker_config::config_path(dir.path()))
            .unwrap();

        let config = Config::new(dir.path().to_path_buf(), Some("http://x/graphql".into()), false)
            .unwrap();

        assert_eq!(config.store_collection, "staff");
        assert_eq!(config.project_dir, dir.path().canonicalize().unwrap());
    }
}
