use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for talking to the property backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base URL of the REST API, e.g. `https://api.example.com/api`
    pub api_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Request timeout; requests wait indefinitely when unset
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
    /// Route reported after a successful save
    pub redirect_route: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            api_token: None,
            timeout_secs: None,
            user_agent: concat!("property-edit/", env!("CARGO_PKG_VERSION")).to_string(),
            redirect_route: "/owner/properties".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load from `path`, or from the default location when `path` is None.
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `~/.property-edit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".property-edit").join("config.toml"))
    }
}
