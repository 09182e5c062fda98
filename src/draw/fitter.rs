//! Incremental curve fitting over a sliding window of samples.

use super::bezier::{Bezier, Position};
use super::point::Point;
use super::primitive::StrokeStyle;

const WINDOW: usize = 4;

/// Fixed-capacity ring buffer holding the most recent samples of a stroke.
#[derive(Debug, Default, Clone)]
pub struct PointWindow {
    slots: [Option<Point>; WINDOW],
    head: usize,
    len: usize,
}

impl PointWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Appends a sample, evicting the oldest one when full.
    pub fn push(&mut self, point: Point) {
        let tail = (self.head + self.len) % WINDOW;
        self.slots[tail] = Some(point);
        if self.len == WINDOW {
            self.head = (self.head + 1) % WINDOW;
        } else {
            self.len += 1;
        }
    }

    /// Sample `index` positions after the oldest one.
    pub fn get(&self, index: usize) -> Option<&Point> {
        if index >= self.len {
            return None;
        }
        self.slots[(self.head + index) % WINDOW].as_ref()
    }

    pub fn last(&self) -> Option<&Point> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    fn replace_last(&mut self, point: Point) {
        if let Some(i) = self.len.checked_sub(1) {
            self.slots[(self.head + i) % WINDOW] = Some(point);
        }
    }
}

/// Turns the sample stream of one stroke into Bezier segments.
///
/// Velocity smoothing state is per stroke; call [`CurveFitter::reset`] when
/// a new group starts.
#[derive(Debug, Clone, Default)]
pub struct CurveFitter {
    window: PointWindow,
    last_velocity: f64,
    last_width: f64,
}

impl CurveFitter {
    pub fn new(style: &StrokeStyle) -> Self {
        Self {
            window: PointWindow::new(),
            last_velocity: 0.0,
            last_width: style.base_width(),
        }
    }

    pub fn reset(&mut self, style: &StrokeStyle) {
        *self = Self::new(style);
    }

    pub fn window(&self) -> &PointWindow {
        &self.window
    }

    /// Feeds one accepted sample; returns a segment once enough samples are
    /// buffered.
    ///
    /// The first segment of a stroke is fitted from three samples with the
    /// oldest duplicated as its leading tangent hint. A sample sitting on top
    /// of the previous one replaces it and yields nothing.
    pub fn add_point(&mut self, point: Point, style: &StrokeStyle) -> Option<Bezier> {
        if self
            .window
            .last()
            .is_some_and(|last| last.coincides_with(&point))
        {
            self.window.replace_last(point);
            return None;
        }

        self.window.push(point);
        let positions = match self.window.len() {
            0..=2 => return None,
            3 => {
                let a = self.window.get(0)?;
                [a, a, self.window.get(1)?, self.window.get(2)?]
            }
            _ => [
                self.window.get(0)?,
                self.window.get(1)?,
                self.window.get(2)?,
                self.window.get(3)?,
            ],
        };
        let (start, end) = (*positions[1], *positions[2]);
        let window = positions.map(Position::from);

        let widths = self.next_widths(&start, &end, style);
        Some(Bezier::from_window(
            window,
            widths,
            (style.min_width, style.max_width),
        ))
    }

    fn next_widths(&mut self, start: &Point, end: &Point, style: &StrokeStyle) -> (f64, f64) {
        let weight = style.velocity_filter_weight;
        // Equal timestamps read as a 1 ms delta, not as unbounded speed.
        let velocity = weight * end.velocity_from(start) + (1.0 - weight) * self.last_velocity;
        let width = style.width_for_velocity(velocity);
        let widths = (self.last_width, width);
        self.last_velocity = velocity;
        self.last_width = width;
        widths
    }
}
