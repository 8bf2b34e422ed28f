//! Configuration types for quadrat

use crate::QuadratError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub temporal: TemporalConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

/// Where the reference lookups (name matching, reverse geocoding) live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL of a GBIF-compatible API, including the version segment
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    /// 1.0 keeps the backoff fixed between attempts
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
    #[serde(default)]
    pub jitter: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Entries expire this long after their last access
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Earliest plausible year for recorded, identified and modified dates
    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// coordinatePrecision values above this are ignored
    #[serde(default = "default_max_coordinate_precision")]
    pub max_coordinate_precision: f64,
    #[serde(default = "default_coordinate_decimals")]
    pub coordinate_decimals: u32,
}

// Default value functions
fn default_api_url() -> String { "https://api.gbif.org/v1/".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { format!("quadrat/{}", crate::VERSION) }
fn default_max_attempts() -> u32 { 5 }
fn default_backoff_ms() -> u64 { 2000 }
fn default_multiplier() -> f32 { 1.0 }
fn default_max_entries() -> usize { 10_000 }
fn default_ttl_minutes() -> u64 { 120 }
fn default_min_year() -> i32 { 1600 }
fn default_max_coordinate_precision() -> f64 { 10.0 }
fn default_coordinate_decimals() -> u32 { 5 }

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            multiplier: default_multiplier(),
            jitter: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            max_coordinate_precision: default_max_coordinate_precision(),
            coordinate_decimals: default_coordinate_decimals(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, QuadratError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), QuadratError> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.lookup.api_url, "https://api.gbif.org/v1/");
        assert_eq!(config.lookup.timeout_secs, 30);
        assert!(config.lookup.user_agent.starts_with("quadrat/"));

        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.backoff_ms, 2000);
        assert_eq!(config.retry.multiplier, 1.0);
        assert!(!config.retry.jitter);

        assert_eq!(config.cache.max_entries, 10_000);
        assert_eq!(config.cache.ttl_minutes, 120);

        assert_eq!(config.temporal.min_year, 1600);

        assert_eq!(config.location.max_coordinate_precision, 10.0);
        assert_eq!(config.location.coordinate_decimals, 5);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[retry]
max_attempts = 2
backoff_ms = 10

[temporal]
min_year = 1700
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.backoff_ms, 10);
        assert_eq!(config.retry.multiplier, 1.0);
        assert_eq!(config.temporal.min_year, 1700);
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[retry]\nmax_attempts = \"many\"\n").unwrap();

        match load_config(file.path()) {
            Err(QuadratError::Configuration(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/quadrat/config.toml");
        assert!(matches!(result, Err(QuadratError::Io(_))));
    }
}
