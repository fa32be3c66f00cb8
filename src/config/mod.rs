//! Toolkit configuration.
//!
//! Settings come from, in increasing precedence:
//! - built-in defaults
//! - config file (~/.config/pipewright/config.toml)
//! - environment variables (PIPEWRIGHT_*)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// pipewright settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Persistence API connection
    #[serde(default)]
    pub api: ApiSettings,

    /// Organization every list/fetch is scoped to
    #[serde(default)]
    pub organization_id: String,
}

/// Persistence API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the configuration API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token, if the deployment requires one
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Settings {
    /// Load settings from the default locations.
    pub fn load() -> Self {
        let mut settings = Self::default();

        let path = Self::config_dir().join("config.toml");
        if let Ok(partial) = Self::load_partial_from_path(&path) {
            settings.apply_partial(partial);
        }

        settings.apply_env_overrides();
        settings
    }

    /// Get the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("pipewright"))
            .unwrap_or_else(|| PathBuf::from(".pipewright"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PIPEWRIGHT_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(token) = std::env::var("PIPEWRIGHT_API_TOKEN") {
            self.api.token = Some(token);
        }
        if let Ok(org) = std::env::var("PIPEWRIGHT_ORG_ID") {
            self.organization_id = org;
        }
    }

    fn load_partial_from_path(path: &Path) -> std::result::Result<PartialSettings, ()> {
        let content = std::fs::read_to_string(path).map_err(|_| ())?;
        toml::from_str(&content).map_err(|_| ())
    }

    fn apply_partial(&mut self, partial: PartialSettings) {
        if let Some(api) = partial.api {
            self.api = api;
        }
        if let Some(org) = partial.organization_id {
            self.organization_id = org;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialSettings {
    api: Option<ApiSettings>,
    organization_id: Option<String>,
}
