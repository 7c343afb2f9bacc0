//! Configuration File Loading
//!
//! Finds the first configuration file on the search path, parses it as TOML
//! or JSON, and validates the result. A file that fails to parse is skipped
//! with a warning rather than aborting startup.

use super::Config;
use crate::error::{Error, Result};
use crate::platform::Platform;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "PLAINSH_CONFIG";

/// Configuration file loader
pub struct ConfigLoader {
    /// Candidate files, in priority order
    search_paths: Vec<PathBuf>,
    /// Path of the file the configuration came from (if any)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension; anything but `.json` reads as TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit file from `--config`, tried before every other location
    pub explicit_path: Option<PathBuf>,
    /// Whether to fall back to defaults when no file is found
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            explicit_path: None,
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a loader over the standard search path
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::load_with_options(LoadOptions::default()).map(|(config, _)| config)
    }

    /// Load configuration, trying `explicit` first when given
    pub fn load_from(explicit: Option<&Path>) -> Result<Config> {
        let options = LoadOptions {
            explicit_path: explicit.map(Path::to_path_buf),
            ..LoadOptions::default()
        };
        Self::load_with_options(options).map(|(config, _)| config)
    }

    /// Load configuration with custom options
    ///
    /// Returns the configuration together with the file it was read from.
    pub fn load_with_options(options: LoadOptions) -> Result<(Config, Option<PathBuf>)> {
        let mut loader = Self::new();
        if let Some(explicit) = options.explicit_path {
            loader.search_paths.insert(0, explicit);
        }

        let config = match loader.find_and_load_config() {
            Some((path, config)) => {
                debug!("Loaded configuration from {}", path.display());
                loader.current_path = Some(path);
                config
            }
            None if options.create_default => Config::default(),
            None => return Err(Error::ConfigNotFound),
        };

        if options.validate {
            loader.validate_config(&config)?;
        }

        Ok((config, loader.current_path))
    }

    /// Save configuration to a specific path, choosing the format by extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let format = ConfigFormat::from_path(path);
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// First candidate that exists and parses
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            if !path.is_file() {
                continue;
            }
            match self.load_config_file(path) {
                Ok(config) => return Some((path.clone(), config)),
                Err(e) => {
                    warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
        None
    }

    /// Load a specific configuration file
    pub fn load_config_file(&self, path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let format = ConfigFormat::from_path(path);
        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: format.name().to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Default candidate files, highest priority first
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            if !explicit.trim().is_empty() {
                paths.push(PathBuf::from(explicit));
            }
        }

        if let Ok(config_dir) = Platform::paths().config_dir() {
            let dir = config_dir.join("plainsh");
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.json"));
        }

        if let Some(home) = Platform::paths().home_dir() {
            paths.push(home.join(".plainsh.toml"));
            paths.push(home.join(".plainsh.json"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".plainsh.toml"));
            paths.push(cwd.join(".plainsh.json"));
        }

        paths
    }

    /// Validate configuration
    fn validate_config(&self, config: &Config) -> Result<()> {
        config.validate().map_err(Error::from)
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
