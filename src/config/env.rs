//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "WEBAPP_QA";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from WEBAPP_QA_BASE_URL
    pub base_url: Option<String>,
    /// Test secret from WEBAPP_QA_TEST_SECRET
    pub test_secret: Option<String>,
    /// Timeout from WEBAPP_QA_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from WEBAPP_QA_FORMAT
    pub format: Option<String>,
    /// Config file from WEBAPP_QA_CONFIG
    pub config_file: Option<String>,
    /// Headed browser from WEBAPP_QA_HEADED
    pub headed: Option<bool>,
    /// Verbose from WEBAPP_QA_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            test_secret: get_env("TEST_SECRET"),
            timeout: get_env_parse("TIMEOUT"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            headed: get_env_bool("HEADED"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.test_secret.is_some()
            || self.timeout.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.headed.is_some()
            || self.verbose.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:    {:?}", ENV_PREFIX, self.base_url);
        println!(
            "  {}_TEST_SECRET: {}",
            ENV_PREFIX,
            if self.test_secret.is_some() { "<set>" } else { "None" }
        );
        println!("  {}_TIMEOUT:     {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_FORMAT:      {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:      {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_HEADED:      {:?}", ENV_PREFIX, self.headed);
        println!("  {}_VERBOSE:     {:?}", ENV_PREFIX, self.verbose);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all WEBAPP_QA environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL     Base URL of the app under test");
    println!("  {ENV_PREFIX}_TEST_SECRET  Value for the X-Test-Secret header");
    println!("  {ENV_PREFIX}_TIMEOUT      HTTP request timeout in seconds");
    println!("  {ENV_PREFIX}_FORMAT       Output format (table, json, csv, summary)");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
    println!("  {ENV_PREFIX}_HEADED       Show the browser window (true/false)");
    println!("  {ENV_PREFIX}_VERBOSE      Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=http://localhost:3000");
    println!("  webapp-qa run --kind api");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets variables for the lifetime of the guard
    struct EnvGuard {
        previous: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&str, &str)]) -> Self {
            let previous = vars
                .iter()
                .map(|(k, v)| {
                    let key = format!("{ENV_PREFIX}_{k}");
                    let old = env::var(&key).ok();
                    env::set_var(&key, v);
                    (key, old)
                })
                .collect();
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.previous {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.headed.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_load() {
        let _guard = EnvGuard::set(&[
            ("BASE_URL", "http://10.0.0.5:3000"),
            ("TIMEOUT", "12"),
            ("HEADED", "yes"),
        ]);

        let config = EnvConfig::load();
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.5:3000"));
        assert_eq!(config.timeout, Some(12));
        assert_eq!(config.headed, Some(true));
        assert!(config.has_any());
    }

    #[test]
    fn test_has_any() {
        let with_secret = EnvConfig {
            test_secret: Some("s".to_string()),
            ..Default::default()
        };
        assert!(with_secret.has_any());
    }
}
