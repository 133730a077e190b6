//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::profile::ScenarioProfile;
use super::AppConfig;
use crate::scenarios;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./webapp-qa.yaml",
    "./webapp-qa.yml",
    "./.webapp-qa.yaml",
    "~/.config/webapp-qa/config.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Scenario profiles
    #[serde(default)]
    pub profiles: Vec<ScenarioProfile>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
            profiles: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        for location in CONFIG_LOCATIONS {
            let path = expand_path(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_path(&path.as_ref().to_string_lossy());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(&path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        let base_url = &self.app.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.app.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        if self.app.browser.poll_interval_ms == 0 {
            anyhow::bail!("browser.poll_interval_ms must be greater than zero");
        }

        for profile in &self.profiles {
            if profile.name.trim().is_empty() {
                anyhow::bail!("Profile names must not be empty");
            }
            for id in &profile.scenarios {
                if scenarios::find(id).is_none() {
                    anyhow::bail!("Unknown scenario '{}' in profile '{}'", id, profile.name);
                }
            }
        }

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
            profiles: vec![
                ScenarioProfile::smoke(),
                ScenarioProfile::new("otp")
                    .with_description("Phone verification and lockout")
                    .with_scenarios(&["TC002"]),
            ],
        }
    }

    /// Get profile by name, falling back to the predefined ones
    pub fn profile(&self, name: &str) -> Option<ScenarioProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .or_else(|| ScenarioProfile::find(name))
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_save_load_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = ConfigFile::example();
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.app.base_url, config.app.base_url);
        assert_eq!(loaded.profiles.len(), 2);
    }

    #[test]
    fn test_config_file_save_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = ConfigFile::default();
        config.app.base_url = "http://127.0.0.1:8080".to_string();
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.app.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validate_unknown_scenario() {
        let mut config = ConfigFile::default();
        config
            .profiles
            .push(ScenarioProfile::new("broken").with_scenarios(&["TC999"]));

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = ConfigFile::default();
        config.app.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_lookup_falls_back_to_predefined() {
        let config = ConfigFile::example();
        assert_eq!(config.profile("otp").unwrap().scenarios, vec!["TC002"]);
        assert!(config.profile("pages").is_some());
        assert!(config.profile("missing").is_none());
    }

    #[test]
    fn test_expand_path() {
        let path = expand_path("./test.yaml");
        assert_eq!(path, PathBuf::from("./test.yaml"));
    }
}
