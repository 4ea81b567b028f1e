//! Configuration handling.
//!
//! Configuration is stored in `config.yaml` under the user config directory
//! and includes authentication credentials for the two upstream services.
//! Environment variables take precedence over the file.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Authentication credentials
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crunchbase: Option<CrunchBaseAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubAuth>,
}

/// CrunchBase (RapidAPI) authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrunchBaseAuth {
    pub api_key: String,
}

/// GitHub authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubAuth {
    pub token: String,
}

impl Config {
    /// Directory holding the config file.
    ///
    /// `DOSSIER_CONFIG_DIR` overrides the platform default so tests and
    /// scripts can point at a temporary location.
    fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("DOSSIER_CONFIG_DIR")
            && !dir.is_empty()
        {
            return PathBuf::from(dir);
        }

        directories::ProjectDirs::from("", "", "dossier")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".dossier"))
    }

    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get the CrunchBase API key from the environment or the config file
    pub fn crunchbase_api_key(&self) -> Option<String> {
        if let Ok(key) = env::var("RAPID_API_KEY")
            && !key.is_empty()
        {
            return Some(key);
        }

        self.auth.crunchbase.as_ref().map(|c| c.api_key.clone())
    }

    /// Get the GitHub token from the environment or the config file
    pub fn github_token(&self) -> Option<String> {
        if let Ok(token) = env::var("GITHUB_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.github.as_ref().map(|g| g.token.clone())
    }

    /// Set the CrunchBase API key
    pub fn set_crunchbase_api_key(&mut self, api_key: String) {
        self.auth.crunchbase = Some(CrunchBaseAuth { api_key });
    }

    /// Set the GitHub token
    pub fn set_github_token(&mut self, token: String) {
        self.auth.github = Some(GitHubAuth { token });
    }
}
