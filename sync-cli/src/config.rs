//! Configuration management for recipe-sync.
//!
//! Settings come from three places, later ones winning:
//!
//! 1. the TOML file (`recipe-sync.toml` unless `--config` says otherwise);
//! 2. the `RECIPE_SYNC_API_URL` environment variable (base URL only);
//! 3. the `--base-url` flag.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use sync_client::{SyncConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use sync_core::DEFAULT_PAGE_SIZE;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "recipe-sync.toml";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "RECIPE_SYNC_API_URL";

/// Contents of the config file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// API base URL.
    pub base_url: String,
    /// Recipes per page.
    pub page_size: u32,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// User agent override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl FileConfig {
    /// Load the config file at `path`.
    ///
    /// A missing file yields the defaults unless `required` is set (the user
    /// named the file explicitly).
    pub async fn load(path: &Path, required: bool) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file {}", path.display()))
            }
        };
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply the environment and flag overrides and build the client config.
    pub fn resolve(self, env_base_url: Option<String>, flag_base_url: Option<String>) -> SyncConfig {
        let base_url = flag_base_url
            .or(env_base_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(self.base_url);

        let config = SyncConfig::new(&base_url)
            .with_page_size(self.page_size)
            .with_timeout(self.timeout_secs);
        match self.user_agent {
            Some(agent) => config.with_user_agent(&agent),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_default_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = FileConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE), false)
            .await
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::load(&dir.path().join("nope.toml"), true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&path, "base_url = \"https://recipes.example/api/v1\"\npage_size = 24\n")
            .await
            .unwrap();

        let config = FileConfig::load(&path, true).await.unwrap();
        assert_eq!(config.base_url, "https://recipes.example/api/v1");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&path, "page_size = \"many\"").await.unwrap();

        let err = FileConfig::load(&path, false).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let file = FileConfig {
            base_url: "http://file/api".into(),
            ..FileConfig::default()
        };

        let config = file.clone().resolve(None, None);
        assert_eq!(config.base_url, "http://file/api");

        let config = file
            .clone()
            .resolve(Some("http://env/api".into()), None);
        assert_eq!(config.base_url, "http://env/api");

        let config = file.resolve(Some("http://env/api".into()), Some("http://flag/api".into()));
        assert_eq!(config.base_url, "http://flag/api");
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = FileConfig::default().resolve(Some("  ".into()), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn file_settings_reach_client_config() {
        let file = FileConfig {
            page_size: 30,
            timeout_secs: 5,
            user_agent: Some("kitchen-display/2".into()),
            ..FileConfig::default()
        };
        let config = file.resolve(None, None);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "kitchen-display/2");
    }
}
