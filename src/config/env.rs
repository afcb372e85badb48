//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "PARALLEL_MANAGER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Timeout from PARALLEL_MANAGER_TIMEOUT
    pub timeout: Option<u64>,
    /// Worker threads from PARALLEL_MANAGER_WORKERS
    pub workers: Option<usize>,
    /// Log level from PARALLEL_MANAGER_LOG
    pub log_level: Option<String>,
    /// Output format from PARALLEL_MANAGER_FORMAT
    pub format: Option<String>,
    /// Config file from PARALLEL_MANAGER_CONFIG
    pub config_file: Option<String>,
    /// Verbose from PARALLEL_MANAGER_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            timeout: get_env_parse("TIMEOUT"),
            workers: get_env_parse("WORKERS"),
            log_level: get_env("LOG"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.timeout.is_some()
            || self.workers.is_some()
            || self.log_level.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.verbose.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_TIMEOUT:  {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_WORKERS:  {:?}", ENV_PREFIX, self.workers);
        println!("  {}_LOG:      {:?}", ENV_PREFIX, self.log_level);
        println!("  {}_FORMAT:   {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:   {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_VERBOSE:  {:?}", ENV_PREFIX, self.verbose);
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

/// Print all PARALLEL_MANAGER environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_TIMEOUT   Request timeout in seconds");
    println!("  {ENV_PREFIX}_WORKERS   Reactor worker threads");
    println!("  {ENV_PREFIX}_LOG       Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_FORMAT    Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_CONFIG    Path to configuration file");
    println!("  {ENV_PREFIX}_VERBOSE   Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_TIMEOUT=5");
    println!("  parallel-manager run batch.yaml");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Prefixed variables set for one test, restored on drop
    struct ScopedEnv(Vec<(String, Option<String>)>);

    impl ScopedEnv {
        fn set(vars: &[(&str, &str)]) -> Self {
            let saved = vars
                .iter()
                .map(|(name, value)| {
                    let key = format!("{ENV_PREFIX}_{name}");
                    let old = env::var(&key).ok();
                    env::set_var(&key, value);
                    (key, old)
                })
                .collect();
            Self(saved)
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, old) in &self.0 {
                match old {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.timeout.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_overrides_load() {
        let _env = ScopedEnv::set(&[("TIMEOUT", "60"), ("WORKERS", "3"), ("LOG", "debug")]);

        let config = EnvConfig::load();
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.has_any());
    }

    #[test]
    fn test_env_bool_parsing() {
        let _env = ScopedEnv::set(&[("VERBOSE", "on")]);

        let config = EnvConfig::load();
        assert_eq!(config.verbose, Some(true));
    }
}
