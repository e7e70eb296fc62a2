//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Folio has two configuration scopes:
//! - **Global**: User-level settings
//! - **Collection**: Per-collection overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Collection config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$FOLIO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/folio/config.toml`
//! 3. `~/.folio/config.toml`
//!
//! # Collection Config Location
//!
//! `<root>/.folio/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use folio::core::config::Config;
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/notes");
//! let result = Config::load(Some(root)).unwrap();
//! let config = result.config;
//!
//! println!("Documents in: {}", config.source_dir(root).display());
//! println!("Extension: {}", config.extension());
//! println!("On error: {}", config.on_error());
//! ```

pub mod schema;

pub use schema::{CollectionConfig, GlobalConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::store::{DEFAULT_EXTENSION, DEFAULT_IGNORE};
use crate::core::types::ErrorPolicy;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules. Collection config overrides global
/// config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Collection configuration (if the root has one)
    pub collection: Option<CollectionConfig>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `root` is provided, also loads the collection config under it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global_config();
        Self::load_from(global_path.as_deref(), root)
    }

    /// Load configuration from an explicit global file and collection root.
    pub fn load_from(
        global_path: Option<&Path>,
        root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = match global_path {
            Some(path) => Self::read_config::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };

        let collection = match root {
            Some(root) => Self::load_collection(root, &mut warnings)?,
            None => None,
        };

        global.validate()?;
        if let Some(ref c) = collection {
            c.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config { global, collection },
            warnings,
        })
    }

    /// Locate the global config file, if one exists.
    fn find_global_config() -> Option<PathBuf> {
        // 1. Check $FOLIO_CONFIG
        if let Ok(path) = std::env::var("FOLIO_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/folio/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("folio/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.folio/config.toml
        dirs::home_dir()
            .map(|home| home.join(".folio/config.toml"))
            .filter(|path| path.exists())
    }

    fn load_collection(
        root: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<Option<CollectionConfig>, ConfigError> {
        let path = Self::collection_config_path(root);
        if !path.exists() {
            return Ok(None);
        }

        let config = Self::read_config::<CollectionConfig>(&path)?;

        if let Some(source_dir) = &config.source_dir {
            let dir = root.join(source_dir);
            if !dir.is_dir() {
                warnings.push(ConfigWarning {
                    message: format!("source_dir '{}' does not exist yet", dir.display()),
                    path,
                });
            }
        }

        Ok(Some(config))
    }

    /// Read and parse a config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path for a collection's config.
    pub fn collection_config_path(root: &Path) -> PathBuf {
        root.join(".folio/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the document directory for a collection root.
    ///
    /// Defaults to the root itself.
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        match self.collection.as_ref().and_then(|c| c.source_dir.as_deref()) {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }

    /// Get the document file extension.
    ///
    /// Defaults to "md" if not configured.
    pub fn extension(&self) -> &str {
        self.collection
            .as_ref()
            .and_then(|c| c.extension.as_deref())
            .map(|e| e.trim_start_matches('.'))
            .unwrap_or(DEFAULT_EXTENSION)
    }

    /// Get the listing ignore filters.
    ///
    /// Defaults to `[".DS_Store"]` if not configured.
    pub fn ignore(&self) -> Vec<String> {
        match self.collection.as_ref().and_then(|c| c.ignore.as_ref()) {
            Some(filters) => filters.clone(),
            None => DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the repair error policy.
    ///
    /// Defaults to [`ErrorPolicy::FailFast`] if not configured.
    pub fn on_error(&self) -> ErrorPolicy {
        self.collection
            .as_ref()
            .and_then(|c| c.on_error)
            .unwrap_or_default()
    }

    /// Get the editor command.
    ///
    /// The collection override wins over the global setting. `None` means
    /// the platform opener.
    pub fn editor(&self) -> Option<&str> {
        self.collection
            .as_ref()
            .and_then(|c| c.editor.as_deref())
            .or(self.global.editor.as_deref())
    }

    /// Check if created placeholders open in the editor.
    ///
    /// Defaults to `true` if not configured.
    pub fn open_editor_on_create(&self) -> bool {
        self.global.open_editor_on_create.unwrap_or(true)
    }
}
