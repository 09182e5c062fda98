//! Configuration type definitions.

use crate::input::InputMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pen and sampling settings.
///
/// Applied to every new stroke. Strokes already drawn keep the settings they
/// were drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PadConfig {
    /// Narrowest stroke radius, reached at high pointer speed
    #[serde(default = "default_min_width")]
    pub min_width: f64,

    /// Widest stroke radius, reached when the pointer is nearly still
    #[serde(default = "default_max_width")]
    pub max_width: f64,

    /// Radius of single-point dots; 0 derives it from pressure and the widths
    #[serde(default)]
    pub dot_size: f64,

    /// Pen color as CSS color text (e.g. "black", "#1a1aff", "rgb(0, 0, 128)")
    #[serde(default = "default_pen_color")]
    pub pen_color: String,

    /// Color painted on clear; transparent by default
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Weight of the newest velocity sample in the moving average (0.0 - 1.0)
    #[serde(default = "default_velocity_filter_weight")]
    pub velocity_filter_weight: f64,

    /// Samples closer than this to the previous one are dropped; 0 disables
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,

    /// Minimum milliseconds between accepted samples; 0 disables
    #[serde(default = "default_throttle")]
    pub throttle: u64,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            max_width: default_max_width(),
            dot_size: 0.0,
            pen_color: default_pen_color(),
            background_color: default_background_color(),
            velocity_filter_weight: default_velocity_filter_weight(),
            min_distance: default_min_distance(),
            throttle: default_throttle(),
        }
    }
}

/// Drawing surface dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Width in logical units
    #[serde(default = "default_width")]
    pub width: f64,

    /// Height in logical units
    #[serde(default = "default_height")]
    pub height: f64,

    /// Device pixels per logical unit (at least 1.0)
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

/// Input source selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// "pointer" (default) or "mouse-touch" for hosts without pointer events
    #[serde(default)]
    pub mode: InputMode,
}

fn default_min_width() -> f64 {
    0.5
}

fn default_max_width() -> f64 {
    2.5
}

fn default_pen_color() -> String {
    "black".to_string()
}

fn default_background_color() -> String {
    "rgba(0,0,0,0)".to_string()
}

fn default_velocity_filter_weight() -> f64 {
    0.7
}

fn default_min_distance() -> f64 {
    5.0
}

fn default_throttle() -> u64 {
    16
}

fn default_width() -> f64 {
    300.0
}

fn default_height() -> f64 {
    150.0
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}
