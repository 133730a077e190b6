//! Configuration module
//!
//! Handles loading and managing configuration. Precedence, lowest first:
//! built-in defaults, config file, `WEBAPP_QA_*` environment, CLI flags.

mod env;
mod file;
mod profile;

pub use env::{print_env_help, EnvConfig};
pub use file::ConfigFile;
pub use profile::ScenarioProfile;

use serde::{Deserialize, Serialize};

/// Default address of the app under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Shared credential the app accepts from test clients
pub const DEFAULT_TEST_SECRET: &str = "v3ry-s3cr3t-t3st-v4lu3";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the app under test
    pub base_url: String,

    /// Value sent in the `X-Test-Secret` header
    pub test_secret: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Output format (table, json, json-pretty, csv, summary)
    pub output_format: String,

    /// Run scenarios flagged with a known issue instead of skipping them
    pub include_known_issues: bool,

    /// Browser settings for UI scenarios
    pub browser: BrowserSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            test_secret: DEFAULT_TEST_SECRET.to_string(),
            timeout_secs: 30,
            output_format: "table".to_string(),
            include_known_issues: false,
            browser: BrowserSettings::default(),
        }
    }
}

impl AppConfig {
    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(base_url) = &env.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secret) = &env.test_secret {
            self.test_secret = secret.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(format) = &env.format {
            self.output_format = format.clone();
        }
        if let Some(headed) = env.headed {
            self.browser.headless = !headed;
        }
    }
}

/// Headless browser configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,

    pub window_width: u32,
    pub window_height: u32,

    /// Pause before each element action
    pub action_delay_ms: u64,

    /// How long an element may take to become visible
    pub action_timeout_ms: u64,

    /// Navigation timeout
    pub navigation_timeout_ms: u64,

    /// How long a page expectation may take to hold
    pub assertion_timeout_ms: u64,

    /// Interval between visibility polls
    pub poll_interval_ms: u64,

    /// Pass `--no-sandbox` (containers running as root)
    pub no_sandbox: bool,

    /// Chrome binary; auto-detected when unset
    pub chrome_executable: Option<String>,

    /// Extra command-line flags
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
            action_delay_ms: 3000,
            action_timeout_ms: 5000,
            navigation_timeout_ms: 10000,
            assertion_timeout_ms: 3000,
            poll_interval_ms: 100,
            no_sandbox: false,
            chrome_executable: None,
            extra_args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.include_known_issues);
    }

    #[test]
    fn test_browser_defaults() {
        let browser = BrowserSettings::default();
        assert!(browser.headless);
        assert_eq!(browser.action_delay_ms, 3000);
        assert_eq!(browser.action_timeout_ms, 5000);
        assert_eq!(browser.navigation_timeout_ms, 10000);
        assert_eq!(browser.assertion_timeout_ms, 3000);
    }

    #[test]
    fn test_apply_env() {
        let mut config = AppConfig::default();
        let env = EnvConfig {
            base_url: Some("http://127.0.0.1:4000".to_string()),
            timeout: Some(5),
            headed: Some(true),
            ..Default::default()
        };
        config.apply_env(&env);

        assert_eq!(config.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.browser.headless);
        assert_eq!(config.test_secret, DEFAULT_TEST_SECRET);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("base_url: http://qa.local:3000\n").unwrap();
        assert_eq!(config.base_url, "http://qa.local:3000");
        assert_eq!(config.browser.window_width, 1280);
    }
}
