//! Stroke lifecycle: Idle → Drawing → Idle.

use super::group::PointGroup;
use crate::draw::{CurveFitter, DrawPrimitive, Point, Primitive, StrokeStyle};
use log::{debug, trace};

/// Sample filters applied to stroke updates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleFilter {
    /// Minimum distance to the last accepted sample; `0` disables the check.
    pub min_distance: f64,
    /// Minimum milliseconds since the last accepted sample; `0` disables the check.
    pub throttle: u64,
}

impl SampleFilter {
    /// Same filter without throttling (used for the release sample).
    pub fn unthrottled(self) -> Self {
        Self { throttle: 0, ..self }
    }
}

/// What happened to a sample offered to [`StrokeManager::update_stroke`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No stroke is open; the sample was ignored.
    Idle,
    /// Arrived sooner than the throttle interval allows.
    Throttled,
    /// Closer than the minimum distance to the last accepted sample.
    TooClose,
    /// Appended to the open group.
    Accepted,
}

/// Owns the drawing's point groups and routes samples into them.
#[derive(Debug, Clone)]
pub struct StrokeManager {
    groups: Vec<PointGroup>,
    drawing: bool,
    fitter: CurveFitter,
}

impl Default for StrokeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeManager {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            drawing: false,
            fitter: CurveFitter::default(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// True iff the drawing has no groups (an open stroke counts as a group).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups in drawing order, including the open one.
    pub fn groups(&self) -> &[PointGroup] {
        &self.groups
    }

    /// The group currently receiving samples.
    pub fn open_group(&self) -> Option<&PointGroup> {
        if self.drawing {
            self.groups.last()
        } else {
            None
        }
    }

    /// Opens a new group with `style` and feeds it the first sample.
    ///
    /// Beginning while already drawing closes the previous group first.
    pub fn begin_stroke(
        &mut self,
        point: Point,
        style: StrokeStyle,
        filter: SampleFilter,
        sink: &mut dyn DrawPrimitive,
    ) {
        if self.drawing {
            debug!("Stroke restarted before release; closing previous group");
            self.close();
        }

        self.fitter.reset(&style);
        self.groups.push(PointGroup::new(style));
        self.drawing = true;
        debug!("Stroke {} begun at ({:.1}, {:.1})", self.groups.len(), point.x, point.y);

        self.update_stroke(point, filter, sink);
    }

    /// Offers one sample to the open group.
    ///
    /// Accepted samples are appended and any fitted segment is drawn onto
    /// `sink` immediately; the first sample of a group is drawn as a dot.
    pub fn update_stroke(
        &mut self,
        point: Point,
        filter: SampleFilter,
        sink: &mut dyn DrawPrimitive,
    ) -> UpdateOutcome {
        if !self.drawing {
            return UpdateOutcome::Idle;
        }
        let Some(group) = self.groups.last_mut() else {
            self.drawing = false;
            return UpdateOutcome::Idle;
        };

        let first = match group.last_point() {
            None => true,
            Some(last) => {
                let throttle = i64::try_from(filter.throttle).unwrap_or(i64::MAX);
                if throttle > 0 && point.time.saturating_sub(last.time) < throttle {
                    trace!("Dropping sample at {}ms: throttled", point.time);
                    return UpdateOutcome::Throttled;
                }
                if filter.min_distance > 0.0 && point.distance_to(last) < filter.min_distance {
                    trace!("Dropping sample at {}ms: below minimum distance", point.time);
                    return UpdateOutcome::TooClose;
                }
                false
            }
        };

        let curve = self.fitter.add_point(point, &group.style);
        if first {
            sink.draw(&Primitive::dot_for(&point, &group.style), &group.style);
        } else if let Some(curve) = curve {
            sink.draw_curve(&curve, &group.style);
        }
        group.points.push(point);
        UpdateOutcome::Accepted
    }

    /// Flushes `final_point` (if any) and closes the open group.
    ///
    /// The final sample skips the throttle but still honours the minimum
    /// distance. Returns `false` when no stroke was open.
    pub fn end_stroke(
        &mut self,
        final_point: Option<Point>,
        filter: SampleFilter,
        sink: &mut dyn DrawPrimitive,
    ) -> bool {
        if !self.drawing {
            return false;
        }
        if let Some(point) = final_point {
            self.update_stroke(point, filter.unthrottled(), sink);
        }
        self.close();
        true
    }

    /// Closes the open group without adding samples.
    pub fn close(&mut self) {
        if self.drawing {
            let count = self.groups.last().map_or(0, |g| g.points.len());
            debug!("Stroke {} ended with {count} points", self.groups.len());
        }
        self.drawing = false;
        self.fitter = CurveFitter::default();
    }

    /// Discards every group, open or not.
    pub fn clear(&mut self) {
        self.close();
        self.groups.clear();
    }

    /// Appends already captured groups, drawing each onto `sink`.
    pub fn import(&mut self, groups: Vec<PointGroup>, sink: &mut dyn DrawPrimitive) {
        self.close();
        for group in &groups {
            group.render(sink);
        }
        self.groups.extend(groups);
    }

    /// Re-draws every group onto `sink`.
    pub fn render_all(&self, sink: &mut dyn DrawPrimitive) {
        for group in &self.groups {
            group.render(sink);
        }
    }
}
