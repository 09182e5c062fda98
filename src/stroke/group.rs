//! Point groups: the persisted form of one stroke.

use crate::draw::{DrawPrimitive, Point, Primitive, StrokeStyle, stroke_primitives};
use serde::{Deserialize, Serialize};

/// Samples of one stroke together with the style frozen at stroke begin.
///
/// Serialises as `{color, dotSize, minWidth, maxWidth, velocityFilterWeight,
/// points: [{x, y, time, pressure}, ...]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointGroup {
    #[serde(flatten)]
    pub style: StrokeStyle,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl PointGroup {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    pub fn last_point(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Primitive sequence re-derived from the stored samples.
    pub fn primitives(&self) -> Vec<Primitive> {
        stroke_primitives(&self.points, &self.style)
    }

    /// Draws the whole group onto `sink`.
    pub fn render(&self, sink: &mut dyn DrawPrimitive) {
        for primitive in self.primitives() {
            sink.draw(&primitive, &self.style);
        }
    }
}
