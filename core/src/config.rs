//! Configuration for aclseed
//!
//! Settings are read from a JSON file (by default `~/.aclseed/config.json`)
//! and then overridden from the environment.

use crate::error::{ConfigError, Result};
use crate::setup::{Features, KNOWN_FEATURES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Environment variable overriding [`Settings::project_root`]
pub const ENV_PROJECT_ROOT: &str = "ACLSEED_PROJECT_ROOT";
/// Environment variable overriding [`Settings::installed_features`] (comma separated)
pub const ENV_FEATURES: &str = "ACLSEED_FEATURES";

const MAX_INDENT: usize = 16;

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Project checkout the fixture directory is resolved against
    #[serde(default = "default_project_root")]
    pub project_root: String,
    /// Fixture directory, relative to the project root
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: String,
    /// Feature flags visible to the role routines
    #[serde(default = "default_installed_features")]
    pub installed_features: Vec<String>,
    /// Indentation width of written fixtures
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            fixture_dir: default_fixture_dir(),
            installed_features: default_installed_features(),
            indent: default_indent(),
        }
    }
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_fixture_dir() -> String {
    "pr_services/testlib/fixtures".to_string()
}

fn default_installed_features() -> Vec<String> {
    KNOWN_FEATURES.iter().map(|f| f.to_string()).collect()
}

fn default_indent() -> usize {
    4
}

impl Settings {
    /// Expanded project root
    pub fn project_root_path(&self) -> PathBuf {
        expand_tilde(&self.project_root)
    }

    /// Directory fixtures are written to
    pub fn fixture_path(&self) -> PathBuf {
        self.project_root_path().join(&self.fixture_dir)
    }

    pub fn features(&self) -> Features {
        self.installed_features.iter().map(String::as_str).collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fixture_dir.trim().is_empty() {
            return Err(ConfigError::Invalid("fixture_dir must not be empty".to_string()).into());
        }
        if self.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "indent must be at most {}, got {}",
                MAX_INDENT, self.indent
            ))
            .into());
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_PROJECT_ROOT).ok(),
            std::env::var(ENV_FEATURES).ok(),
        );
    }

    fn apply_overrides(&mut self, project_root: Option<String>, features: Option<String>) {
        if let Some(root) = project_root.filter(|r| !r.trim().is_empty()) {
            debug!("Project root from environment: {}", root);
            self.project_root = root;
        }

        if let Some(features) = features {
            debug!("Installed features from environment: {}", features);
            self.installed_features = features
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
}

/// Expand tilde in path
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Get the default config directory
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aclseed")
}

/// Get the default config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}

/// Load settings.
///
/// An explicit `path` must exist. Without one, the default config file is
/// used when present and built-in defaults otherwise.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path.to_path_buf())
        }
        None => Some(get_config_path()).filter(|p| p.exists()),
    };

    let mut settings = match config_path {
        Some(config_path) => {
            debug!("Loading settings from {}", config_path.display());
            let contents = fs::read_to_string(&config_path).await?;
            serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(format!("Failed to parse config JSON: {}", e)))?
        }
        None => Settings::default(),
    };

    settings.apply_env_overrides();
    settings.validate()?;
    Ok(settings)
}

/// Save settings to `path`
pub async fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, json).await?;

    Ok(())
}
