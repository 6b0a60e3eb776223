//! Configuration file support for the zone editor.
//!
//! This module provides serialization and deserialization of editor settings:
//! pixel tolerances used by the geometry engine and logging preferences.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE_NAME, HANDLE_HIT_PX, MIN_ZONE_SIZE_PX, SNAP_PERPENDICULAR_PX, SNAP_THRESHOLD_PX,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Geometry tolerances
    #[serde(default)]
    pub geometry: GeometryConfig,
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Rendered width assumed when replaying gestures without an explicit size
    #[serde(default = "default_render_width")]
    pub default_render_width: f64,
}

fn default_render_width() -> f64 {
    1000.0
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            default_render_width: default_render_width(),
        }
    }
}

/// Pixel tolerances of the geometry engine.
///
/// All values are measured on the rendered image and converted to
/// normalized units per event, see [`crate::viewport::Tolerances`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Minimum zone width and height
    #[serde(default = "default_min_zone_size")]
    pub min_zone_size_px: f64,

    /// Distance under which an edge snaps
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold_px: f64,

    /// Perpendicular proximity that still allows snapping to a non-overlapping zone
    #[serde(default = "default_snap_perpendicular")]
    pub snap_perpendicular_px: f64,

    /// Half-width of the resize handle grab area
    #[serde(default = "default_handle_hit")]
    pub handle_hit_px: f64,
}

fn default_min_zone_size() -> f64 {
    MIN_ZONE_SIZE_PX
}

fn default_snap_threshold() -> f64 {
    SNAP_THRESHOLD_PX
}

fn default_snap_perpendicular() -> f64 {
    SNAP_PERPENDICULAR_PX
}

fn default_handle_hit() -> f64 {
    HANDLE_HIT_PX
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_zone_size_px: default_min_zone_size(),
            snap_threshold_px: default_snap_threshold(),
            snap_perpendicular_px: default_snap_perpendicular(),
            handle_hit_px: default_handle_hit(),
        }
    }
}

impl GeometryConfig {
    /// Disable snapping entirely while keeping the other tolerances.
    pub fn without_snapping(mut self) -> Self {
        self.snap_threshold_px = 0.0;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_zone_size_px", self.min_zone_size_px),
            ("snap_threshold_px", self.snap_threshold_px),
            ("snap_perpendicular_px", self.snap_perpendicular_px),
            ("handle_hit_px", self.handle_hit_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: Preferences::default(),
            geometry: GeometryConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.geometry.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit path.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("zone-editor").join(CONFIG_FILE_NAME))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("zone-editor")
                    .join(CONFIG_FILE_NAME)
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A tolerance is negative or not a number
    #[error("Invalid value {value} for '{field}'")]
    InvalidValue { field: String, value: f64 },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
