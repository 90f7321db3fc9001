/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tonearm_importer::{ImportConfig, SUPPORTED_EXTENSIONS};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "tonearm.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_import")]
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportSettings {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub follow_links: bool,

    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            import: default_import(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tonearm.toml` in the
    /// working directory is used if present. `TONEARM_*` variables override
    /// file values, with `__` between nested keys (`TONEARM_IMPORT__WORKERS`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, environment())
    }

    fn build(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.import.workers == 0 {
            return Err(CliError::Config(
                "import.workers must be at least 1".to_string(),
            ));
        }

        if self.import.extensions.is_empty() {
            return Err(CliError::Config(
                "import.extensions must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl ImportSettings {
    /// Importer configuration for these settings
    pub fn to_import_config(&self) -> ImportConfig {
        ImportConfig {
            workers: self.workers.max(1),
            extensions: self.extensions.iter().map(|e| e.to_lowercase()).collect(),
            follow_links: self.follow_links,
            max_depth: self.max_depth,
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TONEARM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_log_level() -> String {
    "info".to_string()
}

fn default_import() -> ImportSettings {
    ImportSettings {
        workers: default_workers(),
        extensions: default_extensions(),
        follow_links: false,
        max_depth: None,
    }
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_extensions() -> Vec<String> {
    SUPPORTED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.import.workers, num_cpus::get());
        assert!(config.import.extensions.iter().any(|e| e == "mp3"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tonearm.toml");
        fs::write(
            &path,
            "log_level = \"debug\"\n\n[import]\nworkers = 2\nextensions = [\"mp3\"]\nmax_depth = 3\n",
        )
        .unwrap();

        let config = AppConfig::build(Some(&path), env(&[])).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.import.workers, 2);
        assert_eq!(config.import.extensions, vec!["mp3"]);
        assert_eq!(config.import.max_depth, Some(3));
        assert!(!config.import.follow_links);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tonearm.toml");
        fs::write(&path, "[import]\nworkers = 2\n").unwrap();

        let config = AppConfig::build(
            Some(&path),
            env(&[
                ("TONEARM_IMPORT__WORKERS", "6"),
                ("TONEARM_LOG_LEVEL", "warn"),
            ]),
        )
        .unwrap();
        assert_eq!(config.import.workers, 6);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::build(Some(Path::new("/nonexistent/tonearm.toml")), env(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut config = AppConfig::default();
        config.import.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn settings_convert_to_import_config() {
        let settings = ImportSettings {
            workers: 3,
            extensions: vec!["FLAC".to_string()],
            follow_links: true,
            max_depth: Some(2),
        };
        let config = settings.to_import_config();
        assert_eq!(config.workers, 3);
        assert_eq!(config.extensions, vec!["flac"]);
        assert!(config.follow_links);
        assert_eq!(config.max_depth, Some(2));
    }
}
