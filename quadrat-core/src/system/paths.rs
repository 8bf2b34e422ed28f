//! Where quadrat keeps its files
//!
//! Both locations are read from the environment on every call, so a test
//! or wrapper script can redirect them at runtime.

use std::path::PathBuf;

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `$QUADRAT_HOME`, else `~/.quadrat`, else `./.quadrat`
pub fn quadrat_home() -> PathBuf {
    env_path("QUADRAT_HOME").unwrap_or_else(|| {
        env_path("HOME")
            .or_else(|| env_path("USERPROFILE"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quadrat")
    })
}

/// `$QUADRAT_CONFIG`, else `config.toml` under [`quadrat_home`]
pub fn config_path() -> PathBuf {
    env_path("QUADRAT_CONFIG").unwrap_or_else(|| quadrat_home().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_under_home_by_default() {
        if std::env::var_os("QUADRAT_CONFIG").is_none() {
            assert_eq!(config_path(), quadrat_home().join("config.toml"));
        }
    }

    #[test]
    fn test_home_ends_in_dot_quadrat_without_override() {
        if std::env::var_os("QUADRAT_HOME").is_none() {
            assert!(quadrat_home().ends_with(".quadrat"));
        }
    }
}
