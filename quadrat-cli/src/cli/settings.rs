//! Effective configuration for one invocation

use quadrat_core::system::paths::config_path;
use quadrat_core::{load_config, Config, QuadratError};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub struct Settings {
    pub config: Config,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

impl Settings {
    /// An explicit `--config` must exist; the default location may be absent
    pub fn load(explicit: Option<&Path>, api_url: Option<&str>) -> Result<Self, QuadratError> {
        let (mut config, source) = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(QuadratError::Configuration(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                (read(path)?, Some(path.to_path_buf()))
            }
            None => {
                let path = config_path();
                if path.exists() {
                    (read(&path)?, Some(path))
                } else {
                    debug!("No config at {}, using defaults", path.display());
                    (Config::default(), None)
                }
            }
        };

        if let Some(url) = api_url {
            config.lookup.api_url = url.to_string();
        }
        Url::parse(&config.lookup.api_url).map_err(|e| {
            QuadratError::Configuration(format!("Invalid api_url {}: {}", config.lookup.api_url, e))
        })?;

        Ok(Self { config, source })
    }
}

fn read(path: &Path) -> Result<Config, QuadratError> {
    load_config(path).map_err(|e| match e {
        QuadratError::Io(io) => {
            QuadratError::Configuration(format!("Cannot read {}: {}", path.display(), io))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_explicit_config() {
        let result = Settings::load(Some(Path::new("/nonexistent/quadrat.toml")), None);
        assert!(matches!(result, Err(QuadratError::Configuration(_))));
    }

    #[test]
    fn test_explicit_config_and_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[temporal]\nmin_year = 1700").unwrap();

        let settings = Settings::load(Some(file.path()), Some("http://localhost:8080/v1/")).unwrap();
        assert_eq!(settings.config.temporal.min_year, 1700);
        assert_eq!(settings.config.lookup.api_url, "http://localhost:8080/v1/");
        assert_eq!(settings.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_invalid_api_url() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lookup]\napi_url = \"not a url\"").unwrap();
        let result = Settings::load(Some(file.path()), None);
        assert!(matches!(result, Err(QuadratError::Configuration(_))));
    }
}
