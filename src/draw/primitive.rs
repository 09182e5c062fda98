//! Backend-neutral drawing primitives shared by the raster and vector renderers.

use super::bezier::{Bezier, Position};
use super::fitter::CurveFitter;
use super::point::Point;
use serde::{Deserialize, Serialize};

/// Style options frozen when a stroke begins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    /// CSS color text used for both renderers.
    #[serde(alias = "penColor")]
    pub color: String,
    /// Fixed dot radius; `0` picks a pressure-scaled radius from the widths.
    #[serde(default)]
    pub dot_size: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub velocity_filter_weight: f64,
}

impl StrokeStyle {
    /// Width used before any velocity has been observed.
    pub fn base_width(&self) -> f64 {
        (self.min_width + self.max_width) / 2.0
    }

    /// Maps smoothed velocity to a width: faster is thinner, never below
    /// `min_width`.
    pub fn width_for_velocity(&self, velocity: f64) -> f64 {
        (self.max_width / (velocity.max(0.0) + 1.0)).max(self.min_width)
    }

    /// Radius of a dot stamped for a sample with the given pressure.
    ///
    /// Zero pressure means the device did not report any and falls back to
    /// the base width.
    pub fn dot_radius(&self, pressure: f64) -> f64 {
        if self.dot_size > 0.0 {
            return self.dot_size;
        }
        if pressure > 0.0 {
            self.min_width + (self.max_width - self.min_width) * pressure.min(1.0)
        } else {
            self.base_width()
        }
    }
}

/// One unit of drawing output.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Dot { center: Position, radius: f64 },
    Curve(Bezier),
}

impl Primitive {
    /// The dot stamped at the first sample of every stroke.
    pub fn dot_for(point: &Point, style: &StrokeStyle) -> Self {
        Primitive::Dot {
            center: Position::from(point),
            radius: style.dot_radius(point.pressure),
        }
    }
}

/// Capability to draw primitives onto some backend.
pub trait DrawPrimitive {
    fn draw_dot(&mut self, center: Position, radius: f64, style: &StrokeStyle);

    fn draw_curve(&mut self, curve: &Bezier, style: &StrokeStyle);

    fn draw(&mut self, primitive: &Primitive, style: &StrokeStyle) {
        match primitive {
            Primitive::Dot { center, radius } => self.draw_dot(*center, *radius, style),
            Primitive::Curve(curve) => self.draw_curve(curve, style),
        }
    }
}

/// Derives the primitive sequence of one stroke from its stored samples.
///
/// This is the same sequence the live capture path emits: a dot at the
/// first sample followed by every segment the fitter produces.
pub fn stroke_primitives(points: &[Point], style: &StrokeStyle) -> Vec<Primitive> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut primitives = vec![Primitive::dot_for(first, style)];
    let mut fitter = CurveFitter::new(style);
    for point in points {
        if let Some(curve) = fitter.add_point(*point, style) {
            primitives.push(Primitive::Curve(curve));
        }
    }
    primitives
}
