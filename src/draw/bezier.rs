//! Cubic Bezier segments with variable width.

/// A 2D position without timing information (curve control points).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn midpoint(self, other: Position) -> Position {
        Position::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<&super::Point> for Position {
    fn from(point: &super::Point) -> Self {
        Position::new(point.x, point.y)
    }
}

/// Number of parametric samples used to approximate arc length.
const LENGTH_SAMPLES: usize = 24;

/// Upper bound on stamps per segment, reached only by absurd geometry.
pub const MAX_WALK_STEPS: usize = 1 << 16;

/// One fitted stroke segment.
///
/// `start_width` and `end_width` are stamp radii, already clamped to the
/// owning group's width range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bezier {
    pub start_point: Position,
    pub control1: Position,
    pub control2: Position,
    pub end_point: Position,
    pub start_width: f64,
    pub end_width: f64,
}

impl Bezier {
    /// Builds a segment, clamping both widths to `min_width..=max_width`.
    pub fn new(
        start_point: Position,
        control1: Position,
        control2: Position,
        end_point: Position,
        (start_width, end_width): (f64, f64),
        (min_width, max_width): (f64, f64),
    ) -> Self {
        let clamp = |w: f64| w.min(max_width).max(min_width);
        Self {
            start_point,
            control1,
            control2,
            end_point,
            start_width: clamp(start_width),
            end_width: clamp(end_width),
        }
    }

    /// Fits the segment between `window[1]` and `window[2]` using the outer
    /// samples as tangent hints.
    pub fn from_window(
        window: [Position; 4],
        widths: (f64, f64),
        width_range: (f64, f64),
    ) -> Self {
        let (_, control1) = control_points(window[0], window[1], window[2]);
        let (control2, _) = control_points(window[1], window[2], window[3]);
        Self::new(
            window[1],
            control1,
            control2,
            window[2],
            widths,
            width_range,
        )
    }

    /// Position at parameter `t` in `0.0..=1.0`.
    pub fn point_at(&self, t: f64) -> Position {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Position::new(
            a * self.start_point.x + b * self.control1.x + c * self.control2.x + d * self.end_point.x,
            a * self.start_point.y + b * self.control1.y + c * self.control2.y + d * self.end_point.y,
        )
    }

    /// Approximate geometric length of the segment.
    pub fn length(&self) -> f64 {
        self.arc_table().total()
    }

    /// Walks the segment at equal arc-length increments of at most `step`.
    ///
    /// Yields `(position, width)` pairs with the width interpolated linearly
    /// by travelled distance. A zero-length segment yields exactly one pair,
    /// and no segment yields more than [`MAX_WALK_STEPS`] + 1.
    pub fn walk(&self, step: f64) -> impl Iterator<Item = (Position, f64)> + '_ {
        let table = self.arc_table();
        let total = table.total();
        let steps = if total > 0.0 && step > 0.0 {
            (total / step).ceil().min(MAX_WALK_STEPS as f64) as usize
        } else {
            0
        };
        (0..=steps).map(move |i| {
            let fraction = if steps == 0 {
                0.0
            } else {
                i as f64 / steps as f64
            };
            let t = table.parameter_at(total * fraction);
            let width = self.start_width + (self.end_width - self.start_width) * fraction;
            (self.point_at(t), width)
        })
    }

    fn arc_table(&self) -> ArcTable {
        let mut lengths = [0.0; LENGTH_SAMPLES + 1];
        let mut previous = self.start_point;
        for (i, slot) in lengths.iter_mut().enumerate().skip(1) {
            let current = self.point_at(i as f64 / LENGTH_SAMPLES as f64);
            *slot = current.distance_to(previous);
            previous = current;
        }
        for i in 1..lengths.len() {
            lengths[i] += lengths[i - 1];
        }
        ArcTable { lengths }
    }
}

/// Cumulative chord lengths at evenly spaced parameters.
struct ArcTable {
    lengths: [f64; LENGTH_SAMPLES + 1],
}

impl ArcTable {
    fn total(&self) -> f64 {
        self.lengths[LENGTH_SAMPLES]
    }

    fn parameter_at(&self, distance: f64) -> f64 {
        if distance <= 0.0 || self.total() <= 0.0 {
            return 0.0;
        }
        if distance >= self.total() {
            return 1.0;
        }
        let upper = self.lengths.partition_point(|&len| len < distance);
        let lower = upper - 1;
        let span = self.lengths[upper] - self.lengths[lower];
        let local = if span > 0.0 {
            (distance - self.lengths[lower]) / span
        } else {
            0.0
        };
        (lower as f64 + local) / LENGTH_SAMPLES as f64
    }
}

/// Catmull-Rom style control points around `s2`.
///
/// Returns the incoming and outgoing control points for the vertex `s2`,
/// placed on a tangent parallel to `s3 - s1` and split by the relative
/// lengths of the neighbouring chords.
fn control_points(s1: Position, s2: Position, s3: Position) -> (Position, Position) {
    let m1 = s1.midpoint(s2);
    let m2 = s2.midpoint(s3);
    let l1 = s1.distance_to(s2);
    let l2 = s2.distance_to(s3);

    let k = if l1 + l2 > 0.0 { l2 / (l1 + l2) } else { 0.0 };
    let cm = Position::new(m2.x + (m1.x - m2.x) * k, m2.y + (m1.y - m2.y) * k);
    let tx = s2.x - cm.x;
    let ty = s2.y - cm.y;

    (
        Position::new(m1.x + tx, m1.y + ty),
        Position::new(m2.x + tx, m2.y + ty),
    )
}


    #[test]
    fn walk_is_bounded_for_huge_segments() {
        let curve = Bezier::new(
            Position::new(0.0, 0.0),
            Position::new(1e200, 0.0),
            Position::new(2e200, 0.0),
            Position::new(3e200, 0.0),
            (1.0, 1.0),
            (0.5, 2.5),
        );
        assert_eq!(curve.walk(0.5).count(), MAX_WALK_STEPS + 1);
    }
