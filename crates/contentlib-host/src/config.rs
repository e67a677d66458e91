//! Host configuration
//!
//! Loaded in layers, later sources overriding earlier ones:
//! - `config/default.toml`
//! - `config/{environment}.toml`
//! - `CONTENTLIB_*` environment variables (`__` separates sections)
//! - command-line arguments

use config::{Config, ConfigError, Environment, File};
use contentlib_loader::DEFAULT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Package discovery settings
    #[serde(default)]
    pub packages: PackagesConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Built-in content of the simulated game
    #[serde(default)]
    pub host: NativeContentConfig,

    /// Simulated startup sequence
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// Package discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Directory scanned recursively for packages
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File name suffix packages are recognized by
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("packages")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Per-object confirmations from the content crates
    #[serde(default)]
    pub extended: bool,

    /// Use JSON formatting
    #[serde(default)]
    pub json_format: bool,

    #[serde(default = "default_true")]
    pub include_timestamps: bool,

    #[serde(default)]
    pub include_thread_ids: bool,

    #[serde(default = "default_true")]
    pub include_target: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            extended: false,
            json_format: false,
            include_timestamps: true,
            include_thread_ids: false,
            include_target: true,
        }
    }
}

/// Built-in content the in-memory game starts with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeContentConfig {
    /// Built-in item prefab names, stored under `Items/`
    #[serde(default)]
    pub items: Vec<String>,

    /// Built-in enemy spawn object names, stored under `Enemies/`
    #[serde(default)]
    pub enemies: Vec<String>,

    /// Any other built-in template identifiers, stored as given
    #[serde(default)]
    pub templates: Vec<String>,

    /// Spawn every registered network prefab once after loading
    #[serde(default)]
    pub developer_mode: bool,
}

impl NativeContentConfig {
    /// Every built-in template identifier
    pub fn template_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|name| format!("{}/{}", contentlib_core::paths::ITEMS_FOLDER, name))
            .chain(
                self.enemies
                    .iter()
                    .map(|name| format!("{}/{}", contentlib_core::paths::ENEMIES_FOLDER, name)),
            )
            .chain(self.templates.iter().cloned())
            .collect()
    }
}

/// Simulated startup sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Number of item catalog rebuilds to simulate
    #[serde(default = "default_rebuilds")]
    pub catalog_rebuilds: u32,
}

fn default_rebuilds() -> u32 {
    2
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            catalog_rebuilds: default_rebuilds(),
        }
    }
}

impl HostConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed
    pub fn load(config_dir: impl Into<PathBuf>, environment: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.into();

        let config = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", environment))).required(false))
            // e.g. CONTENTLIB_LIFECYCLE__CATALOG_REBUILDS=3
            .add_source(
                Environment::with_prefix("CONTENTLIB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration with defaults if it cannot be read
    pub fn load_or_default(config_dir: impl Into<PathBuf>, environment: &str) -> Self {
        Self::load(config_dir, environment).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Self::default()
        })
    }
}
