//! Stroke capture: point groups and the stroke state machine.
//!
//! Raw samples flow into [`StrokeManager`], which filters them, appends them
//! to the open [`PointGroup`] and draws whatever the curve fitter produces.

pub mod group;
pub mod manager;

pub use group::PointGroup;
pub use manager::{SampleFilter, StrokeManager, UpdateOutcome};
