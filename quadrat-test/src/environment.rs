//! Test environment management
//!
//! Isolated working directories with `QUADRAT_HOME` and `QUADRAT_CONFIG`
//! pointed inside them, restored on drop.

use anyhow::{Context, Result};
use quadrat_core::{save_config, Config, VerbatimRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::write_records_jsonl;

pub struct TestEnvironment {
    temp_dir: TempDir,
    saved_env: HashMap<&'static str, Option<String>>,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("quadrat-test")
            .context("Cannot create a scratch directory for the test")?;

        let mut env = Self {
            temp_dir,
            saved_env: HashMap::new(),
        };

        let home = env.root().to_path_buf();
        let config = env.config_path();
        env.set_var("QUADRAT_HOME", &home);
        env.set_var("QUADRAT_CONFIG", &config);
        Ok(env)
    }

    /// Remember the caller's value once, then point `key` at `value`
    fn set_var(&mut self, key: &'static str, value: &Path) {
        self.saved_env
            .entry(key)
            .or_insert_with(|| std::env::var(key).ok());
        std::env::set_var(key, value);
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join("config.toml")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Save a config where `QUADRAT_CONFIG` points
    pub fn write_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.config_path();
        save_config(&path, config)?;
        Ok(path)
    }

    /// Write records as JSON lines under the environment root
    pub fn write_records(&self, name: &str, records: &[VerbatimRecord]) -> Result<PathBuf> {
        let path = self.path(name);
        write_records_jsonl(&path, records)?;
        Ok(path)
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Non-empty lines of a file under the environment root
    pub fn read_lines(&self, name: &str) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(self.path(name))
            .with_context(|| format!("Failed to read {}", name))?;
        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
