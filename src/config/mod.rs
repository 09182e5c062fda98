//! Configuration file support for inkpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkpad/config.toml`. Settings include pen defaults, sample
//! filtering, the drawing surface size, and which input events to listen for.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{InputConfig, PadConfig, SurfaceConfig};

use crate::draw::Color;
use crate::pad::{PadOptions, SurfaceSize};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [pad]
/// min_width = 0.5
/// max_width = 2.5
/// pen_color = "#1a1aff"
/// throttle = 16
///
/// [surface]
/// width = 600
/// height = 200
/// device_pixel_ratio = 2.0
///
/// [input]
/// mode = "mouse-touch"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pen and sampling settings
    #[serde(default)]
    pub pad: PadConfig,

    /// Drawing surface size
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Input event selection
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `min_width`, `max_width`: >= 0.0, with `min_width <= max_width`
    /// - `dot_size`, `min_distance`: >= 0.0
    /// - `velocity_filter_weight`: 0.0 - 1.0
    /// - `surface.width`, `surface.height`: >= 1.0
    /// - `surface.device_pixel_ratio`: >= 1.0
    pub fn validate_and_clamp(&mut self) {
        let pad = &mut self.pad;

        for (name, value) in [
            ("min_width", &mut pad.min_width),
            ("max_width", &mut pad.max_width),
            ("dot_size", &mut pad.dot_size),
            ("min_distance", &mut pad.min_distance),
        ] {
            if value.is_nan() || *value < 0.0 {
                warn!("Invalid {name} {value:.2}, clamping to 0.0");
                *value = 0.0;
            }
        }

        if pad.min_width > pad.max_width {
            warn!(
                "min_width {:.2} exceeds max_width {:.2}, using {:.2} for both",
                pad.min_width, pad.max_width, pad.max_width
            );
            pad.min_width = pad.max_width;
        }

        if !(0.0..=1.0).contains(&pad.velocity_filter_weight) {
            warn!(
                "Invalid velocity_filter_weight {:.2}, clamping to 0.0-1.0 range",
                pad.velocity_filter_weight
            );
            pad.velocity_filter_weight = if pad.velocity_filter_weight.is_nan() {
                0.7
            } else {
                pad.velocity_filter_weight.clamp(0.0, 1.0)
            };
        }

        if let Err(err) = Color::parse(&pad.pen_color) {
            warn!("Invalid pen_color: {err}, falling back to 'black'");
            pad.pen_color = "black".to_string();
        }

        if let Err(err) = Color::parse(&pad.background_color) {
            warn!("Invalid background_color: {err}, falling back to transparent");
            pad.background_color = "rgba(0,0,0,0)".to_string();
        }

        let surface = &mut self.surface;
        for (name, value) in [
            ("width", &mut surface.width),
            ("height", &mut surface.height),
            ("device_pixel_ratio", &mut surface.device_pixel_ratio),
        ] {
            if value.is_nan() || *value < 1.0 {
                warn!("Invalid surface {name} {value:.2}, clamping to 1.0");
                *value = 1.0;
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> Schema {
        schema_for!(Config)
    }

    pub fn pad_options(&self) -> PadOptions {
        PadOptions::from(&self.pad)
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.surface.width,
            height: self.surface.height,
            ratio: self.surface.device_pixel_ratio,
        }
    }
}

impl From<&PadConfig> for PadOptions {
    fn from(config: &PadConfig) -> Self {
        Self {
            min_width: config.min_width,
            max_width: config.max_width,
            dot_size: config.dot_size,
            pen_color: config.pen_color.clone(),
            background_color: config.background_color.clone(),
            velocity_filter_weight: config.velocity_filter_weight,
            min_distance: config.min_distance,
            throttle: config.throttle,
        }
    }
}
