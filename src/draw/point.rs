//! Input samples.

use serde::{Deserialize, Serialize};

/// A single sample of the pointer position.
///
/// Coordinates are in logical surface units, `time` is a millisecond
/// timestamp and `pressure` is normalised to `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub time: i64,
    #[serde(default)]
    pub pressure: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, pressure: f64, time: i64) -> Self {
        Self {
            x,
            y,
            time,
            pressure: if pressure.is_finite() {
                pressure.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both samples sit on the same spot.
    pub fn coincides_with(&self, other: &Point) -> bool {
        self.distance_to(other) < f64::EPSILON
    }

    /// Speed in units per millisecond travelled since `start`.
    ///
    /// Duplicate timestamps count as a 1 ms delta.
    pub fn velocity_from(&self, start: &Point) -> f64 {
        let elapsed = self.time.saturating_sub(start.time).unsigned_abs().max(1);
        self.distance_to(start) / elapsed as f64
    }
}


    #[test]
    fn velocity_survives_extreme_timestamps() {
        let a = Point::new(0.0, 0.0, 0.5, i64::MIN);
        let b = Point::new(3.0, 4.0, 0.5, i64::MAX);
        assert!(b.velocity_from(&a) > 0.0);
        assert!(a.velocity_from(&b) > 0.0);
    }
