//! Stroke geometry and the two rendering backends.
//!
//! This module defines the core drawing types:
//! - [`Point`]: timestamped pointer sample
//! - [`Bezier`]: variable-width cubic segment
//! - [`CurveFitter`]: turns a sliding window of samples into segments
//! - [`Primitive`] and [`DrawPrimitive`]: backend-neutral output and the
//!   capability both renderers implement
//! - [`RasterRenderer`] (Cairo) and [`SvgRenderer`] (markup)

pub mod bezier;
pub mod color;
pub mod fitter;
pub mod point;
pub mod primitive;
pub mod raster;
pub mod svg;

pub use bezier::{Bezier, Position};
pub use color::{Color, ColorParseError};
pub use fitter::{CurveFitter, PointWindow};
pub use point::Point;
pub use primitive::{DrawPrimitive, Primitive, StrokeStyle, stroke_primitives};
pub use raster::RasterRenderer;
pub use svg::{SvgOptions, SvgRenderer};
